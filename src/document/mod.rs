//! Document parsing module
//!
//! This module parses Microsoft Word (.docx) documents into classified
//! paragraphs and assembles them into content store articles.

pub mod article;
pub(crate) mod cleanup;
pub(crate) mod io;
pub mod loader;
pub mod models;
pub(crate) mod parsing;

pub use article::{build_article, ArticleBuilder, ArticleKind};
pub use loader::{extract_article, load_document};
pub use models::*;
