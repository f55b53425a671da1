//! Text extraction and run formatting
//!
//! This module pulls plain text and boldness out of docx-rs paragraph and
//! run elements.

use super::super::cleanup::normalize_whitespace;

/// Extract plain text from a paragraph, handling various child elements
pub(crate) fn extract_paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    collect_children_text(&para.children, &mut text);
    normalize_whitespace(&text)
}

fn collect_children_text(children: &[docx_rs::ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            docx_rs::ParagraphChild::Run(run) => {
                text.push_str(&extract_run_text(run));
            }
            docx_rs::ParagraphChild::Insert(insert) => {
                // Accepted track-change insertions read as normal text
                for child in &insert.children {
                    if let docx_rs::InsertChild::Run(run) = child {
                        text.push_str(&extract_run_text(run));
                    }
                }
            }
            docx_rs::ParagraphChild::Hyperlink(link) => {
                collect_children_text(&link.children, text);
            }
            docx_rs::ParagraphChild::Delete(_) => {
                // Skip deletions (track changes)
            }
            _ => {}
        }
    }
}

/// Extract text from a run; tabs and breaks become spaces
pub(crate) fn extract_run_text(run: &docx_rs::Run) -> String {
    let mut text = String::new();

    for child in &run.children {
        match child {
            docx_rs::RunChild::Text(text_elem) => {
                text.push_str(&text_elem.text);
            }
            docx_rs::RunChild::Tab(_) | docx_rs::RunChild::Break(_) => {
                text.push(' ');
            }
            _ => {}
        }
    }

    text
}

pub(crate) fn is_run_bold(run: &docx_rs::Run) -> bool {
    run.run_property.bold.is_some()
}

/// True when every run carrying visible text is bold
pub(crate) fn is_bold_only(para: &docx_rs::Paragraph) -> bool {
    let mut saw_text = false;

    for child in &para.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            if extract_run_text(run).trim().is_empty() {
                continue;
            }
            if !is_run_bold(run) {
                return false;
            }
            saw_text = true;
        }
    }

    saw_text
}
