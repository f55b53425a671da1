use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::{ContentKey, KeyResolver};
use crate::extractor::{ExtractOptions, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid keyword rule '{keyword}' in {path}: {source}")]
    Keyword {
        path: PathBuf,
        keyword: String,
        source: crate::content::UnknownContentKey,
    },
}

/// Extractor configuration (`~/.config/docsite/config.toml`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub extract_images: bool,
    /// Ask the operator when a filename matches no keyword
    pub prompt: bool,
    /// Extra keyword rules, consulted after the built-in table
    pub keywords: Vec<KeywordRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keyword: String,
    pub key: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            extract_images: true,
            prompt: true,
            keywords: Vec::new(),
        }
    }
}

impl Config {
    /// Load from an explicit path, or from the config directory when present
    ///
    /// A missing file in the config directory means defaults; a missing
    /// explicit path is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::get_config_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Config::default()),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        // Surface bad keys at load time rather than mid-batch
        config
            .keyword_rules()
            .map_err(|(keyword, source)| ConfigError::Keyword {
                path: path.to_path_buf(),
                keyword,
                source,
            })?;

        Ok(config)
    }

    /// Get the path to the default config file
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("docsite").join("config.toml"))
    }

    fn keyword_rules(
        &self,
    ) -> Result<Vec<(String, ContentKey)>, (String, crate::content::UnknownContentKey)> {
        self.keywords
            .iter()
            .map(|rule| {
                rule.key
                    .parse::<ContentKey>()
                    .map(|key| (rule.keyword.clone(), key))
                    .map_err(|err| (rule.keyword.clone(), err))
            })
            .collect()
    }

    /// Built-in keyword table followed by the configured rules
    pub fn key_resolver(&self) -> KeyResolver {
        let rules = self.keyword_rules().unwrap_or_default();
        KeyResolver::new().with_extra_rules(rules)
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            input_dir: self.input_dir.clone(),
            output_dir: self.output_dir.clone(),
            extract_images: self.extract_images,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
input_dir = "docs"

[[keywords]]
keyword = "river"
key = "fluvial"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.input_dir, PathBuf::from("docs"));
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert!(config.extract_images);
        assert!(config.prompt);
        assert_eq!(
            config.key_resolver().resolve("River_Systems"),
            Some(ContentKey::Fluvial)
        );
    }

    #[test]
    fn test_unknown_key_in_rule_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[[keywords]]\nkeyword = \"rock\"\nkey = \"geology\"\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Keyword { ref keyword, .. } if keyword == "rock"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "prompt = maybe").unwrap();
        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::Parse { .. })
        ));
    }
}
