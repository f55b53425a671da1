//! Persistent content store (`assets/content.json`)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use super::models::{Article, ContentKey};
use crate::error::{ExtractError, Result};

/// Mapping from content key to article, in file order
///
/// Entries are held as raw JSON. Only the key being upserted is
/// re-serialized, so unknown keys, non-article values and extra fields on
/// untouched articles are written back exactly as they were read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentStore {
    entries: Map<String, Value>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the store from disk, starting empty when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::new());
        }

        serde_json::from_str(&content).map_err(|source| ExtractError::CorruptStore {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the store via a sibling temp file and rename, so readers never
    /// observe a half-written file
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut json = self.to_json()?;
        json.push('\n');

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path)?;

        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The article stored under `key`, if present and article-shaped
    pub fn get(&self, key: ContentKey) -> Option<Article> {
        let value = self.entries.get(key.as_str())?;
        match serde_json::from_value(value.clone()) {
            Ok(article) => Some(article),
            Err(err) => {
                tracing::debug!("entry '{key}' is not an article: {err}");
                None
            }
        }
    }

    /// Raw JSON for any entry, including ones outside the key vocabulary
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Replace the article for `key` wholesale, returning the previous value
    ///
    /// An existing key keeps its position in the file; a new key is appended.
    pub fn upsert(&mut self, key: ContentKey, article: &Article) -> Result<Option<Value>> {
        let value = serde_json::to_value(article)?;
        Ok(self.entries.insert(key.as_str().to_string(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
