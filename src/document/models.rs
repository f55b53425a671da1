//! Intermediate representation of a parsed .docx file
//!
//! A document is reduced to an ordered list of classified, plain-text
//! paragraphs. Assembly into an [`Article`](crate::content::Article) happens
//! in [`super::article`].

use serde::{Deserialize, Serialize};

/// What a paragraph contributes to an article, decided from its style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParagraphKind {
    Title,
    Heading(u8),
    ListItem,
    Quote,
    Caption,
    Plain,
}

impl ParagraphKind {
    pub fn is_heading(&self) -> bool {
        matches!(self, ParagraphKind::Title | ParagraphKind::Heading(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocParagraph {
    pub kind: ParagraphKind,
    pub text: String,
}

impl DocParagraph {
    pub fn new(kind: ParagraphKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub file_path: String,
    pub paragraphs: Vec<DocParagraph>,
    pub word_count: usize,
}
