//! Document loading
//!
//! `load_document()` validates a .docx file, reads it with docx-rs and walks
//! the body paragraphs in order, producing classified plain-text paragraphs.

use std::path::Path;

use super::article::{build_article, ArticleKind};
use super::cleanup::count_words;
use super::io::validate_docx_file;
use super::models::*;
use super::parsing::list::strip_bullet_prefix;
use super::parsing::{formatting::extract_paragraph_text, style::classify_paragraph};
use crate::content::models::Article;
use crate::error::Result;

/// Read a .docx file into its ordered, classified paragraphs
///
/// Tables and other non-paragraph body content are not part of an article
/// and are skipped. Empty paragraphs are dropped.
pub fn load_document(file_path: &Path) -> Result<ParsedDocument> {
    validate_docx_file(file_path)?;

    let file_data = std::fs::read(file_path)?;
    let docx = docx_rs::read_docx(&file_data)?;

    let mut paragraphs = Vec::new();
    let mut word_count = 0;

    for child in &docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(para) = child {
            let text = extract_paragraph_text(para);
            if text.is_empty() {
                continue;
            }

            let kind = classify_paragraph(para, &text);
            let text = match kind {
                ParagraphKind::ListItem => strip_bullet_prefix(&text).to_string(),
                _ => text,
            };

            word_count += count_words(&text);
            paragraphs.push(DocParagraph { kind, text });
        }
    }

    Ok(ParsedDocument {
        file_path: file_path.to_string_lossy().to_string(),
        paragraphs,
        word_count,
    })
}

/// Load a document and assemble it into an article of the given layout
pub fn extract_article(file_path: &Path, kind: ArticleKind) -> Result<Article> {
    let document = load_document(file_path)?;
    tracing::debug!(
        path = %document.file_path,
        paragraphs = document.paragraphs.len(),
        words = document.word_count,
        "parsed document"
    );
    Ok(build_article(&document.paragraphs, kind))
}
