//! Document parsing utilities
//!
//! Paragraph-level helpers: text extraction, style classification and list
//! detection.

pub(crate) mod formatting;
pub(crate) mod list;
pub(crate) mod style;
