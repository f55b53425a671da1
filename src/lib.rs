//! docsite: Word documents in, static site content out
//!
//! The native side extracts .docx files into `assets/content.json` (plus
//! any embedded images) and can seed .docx files from existing HTML pages.
//! The `web` module is the page-side loader that renders the content store
//! into the site's templates; built for wasm32 it runs in the browser.

pub mod content;
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
pub mod config;
#[cfg(not(target_arch = "wasm32"))]
pub mod document;
#[cfg(not(target_arch = "wasm32"))]
pub mod error;
#[cfg(not(target_arch = "wasm32"))]
pub mod extractor;
#[cfg(not(target_arch = "wasm32"))]
pub mod image_extractor;
#[cfg(not(target_arch = "wasm32"))]
pub mod seed;

// Re-export commonly used types
pub use content::{Article, ContentKey, Section};
#[cfg(not(target_arch = "wasm32"))]
pub use content::ContentStore;
#[cfg(not(target_arch = "wasm32"))]
pub use extractor::{ExtractOptions, ExtractionReport, Extractor};
pub use web::{ContentSnapshot, LoaderState};
