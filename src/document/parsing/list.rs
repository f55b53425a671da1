//! List item detection for paragraphs without a list style

const TYPED_BULLETS: [&str; 3] = ["• ", "- ", "* "];

/// Manually typed bullets ("• item") count as list items
pub(crate) fn is_typed_bullet(text: &str) -> bool {
    let text = text.trim_start();
    TYPED_BULLETS.iter().any(|bullet| text.starts_with(bullet))
}

/// Remove a leading typed bullet, if any
pub(crate) fn strip_bullet_prefix(text: &str) -> &str {
    let trimmed = text.trim_start();
    TYPED_BULLETS
        .iter()
        .find_map(|bullet| trimmed.strip_prefix(bullet))
        .map(str::trim_start)
        .unwrap_or(text)
}

/// Word's automatic lists carry numbering properties even under Normal style
pub(crate) fn has_list_numbering(para: &docx_rs::Paragraph) -> bool {
    para.property.numbering_property.is_some()
}
