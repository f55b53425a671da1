//! Typed, immutable view of a fetched content store

use std::collections::BTreeMap;

use crate::content::models::{Article, ContentKey};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("content is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("content must be a JSON object keyed by page")]
    NotAnObject,
}

/// Articles keyed by content key, validated entry by entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentSnapshot {
    articles: BTreeMap<String, Article>,
}

impl ContentSnapshot {
    /// Parse a response body
    ///
    /// The body must be a JSON object. Entries that do not have the article
    /// shape are dropped so the rest of the page can still render.
    pub fn parse(body: &str) -> Result<Self, SnapshotError> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        let serde_json::Value::Object(entries) = value else {
            return Err(SnapshotError::NotAnObject);
        };

        let mut articles = BTreeMap::new();
        for (key, entry) in entries {
            match serde_json::from_value::<Article>(entry) {
                Ok(article) => {
                    articles.insert(key, article);
                }
                Err(err) => tracing::debug!("dropping content entry '{key}': {err}"),
            }
        }

        Ok(Self { articles })
    }

    pub fn article(&self, key: &str) -> Option<&Article> {
        self.articles.get(key)
    }

    pub fn home(&self) -> Option<&Article> {
        self.article(ContentKey::Home.as_str())
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}
