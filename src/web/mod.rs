//! Content loader for the static site pages
//!
//! Fetches `assets/content.json` once, validates it into a
//! [`ContentSnapshot`] and renders it into the page through the [`Dom`]
//! trait. The rendering core is target independent; `browser` binds it to
//! the real DOM on wasm32.

pub mod dom;
pub mod render;
pub mod snapshot;

#[cfg(target_arch = "wasm32")]
pub mod browser;
#[cfg(test)]
pub(crate) mod testing;

pub use dom::Dom;
pub use render::{
    article_html, bullets_html, escape_html, load, render, render_article, render_home,
    LoaderState,
};
pub use snapshot::{ContentSnapshot, SnapshotError};
