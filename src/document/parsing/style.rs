//! Paragraph classification
//!
//! Word style ids drive the classification first ("Title", "Heading2",
//! "ListBullet", "Quote", ...). Paragraphs left unclassified fall back to
//! numbering properties, typed bullets and the bold-only heuristic.

use super::super::models::ParagraphKind;
use super::formatting::is_bold_only;
use super::list::{has_list_numbering, is_typed_bullet};

/// Bold-only paragraphs at or above this length are treated as body text
const BOLD_HEADING_MAX_CHARS: usize = 100;

/// Map a style id (or display name) onto a paragraph kind
pub(crate) fn classify_style(style: &str) -> Option<ParagraphKind> {
    let style: String = style
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    if style == "title" {
        return Some(ParagraphKind::Title);
    }

    if let Some(rest) = style.strip_prefix("heading") {
        let level = rest
            .chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .map(|level| level.clamp(1, 9) as u8)
            .unwrap_or(1);
        return Some(ParagraphKind::Heading(level));
    }

    if style.contains("quote") {
        return Some(ParagraphKind::Quote);
    }
    if style.contains("caption") {
        return Some(ParagraphKind::Caption);
    }
    if style.contains("list") {
        return Some(ParagraphKind::ListItem);
    }

    None
}

/// Classify a paragraph whose plain text has already been extracted
pub(crate) fn classify_paragraph(para: &docx_rs::Paragraph, text: &str) -> ParagraphKind {
    if let Some(kind) = para
        .property
        .style
        .as_ref()
        .and_then(|style| classify_style(&style.val))
    {
        return kind;
    }

    if has_list_numbering(para) || is_typed_bullet(text) {
        return ParagraphKind::ListItem;
    }

    if text.chars().count() < BOLD_HEADING_MAX_CHARS && is_bold_only(para) {
        return ParagraphKind::Heading(2);
    }

    ParagraphKind::Plain
}
