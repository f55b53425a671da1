//! Content store types and persistence
//!
//! The models are shared with the browser loader; key resolution and the
//! on-disk store only exist in native builds.

#[cfg(not(target_arch = "wasm32"))]
pub mod keys;
pub mod models;
#[cfg(not(target_arch = "wasm32"))]
pub mod store;

pub use models::*;
#[cfg(not(target_arch = "wasm32"))]
pub use keys::{InteractivePrompt, KeyPrompt, KeyResolver, NoPrompt, KEYWORD_TABLE};
#[cfg(not(target_arch = "wasm32"))]
pub use store::ContentStore;
