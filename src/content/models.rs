//! Core data structures for the content store
//!
//! These types are shared by the extractor (which writes them) and the
//! browser loader (which reads them back out of `content.json`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier selecting which article a page renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKey {
    Maps,
    Tectonics,
    Weathering,
    Fluvial,
    Climate,
    About,
    Home,
    References,
}

impl ContentKey {
    pub const ALL: [ContentKey; 8] = [
        ContentKey::Maps,
        ContentKey::Tectonics,
        ContentKey::Weathering,
        ContentKey::Fluvial,
        ContentKey::Climate,
        ContentKey::About,
        ContentKey::Home,
        ContentKey::References,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKey::Maps => "maps",
            ContentKey::Tectonics => "tectonics",
            ContentKey::Weathering => "weathering",
            ContentKey::Fluvial => "fluvial",
            ContentKey::Climate => "climate",
            ContentKey::About => "about",
            ContentKey::Home => "home",
            ContentKey::References => "references",
        }
    }

    /// Comma separated list of every key, for operator prompts and errors
    pub fn vocabulary() -> String {
        Self::ALL
            .iter()
            .map(|key| key.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown content key '{0}' (expected one of: {vocabulary})", vocabulary = ContentKey::vocabulary())]
pub struct UnknownContentKey(pub String);

impl FromStr for ContentKey {
    type Err = UnknownContentKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == wanted)
            .ok_or_else(|| UnknownContentKey(s.trim().to_string()))
    }
}

/// Structured text of one page
///
/// `bullets` and `image_caption` are only produced for the home page; the
/// generic renderer ignores them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bullets: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_caption: Option<String>,
}

impl Article {
    /// True when extraction found no text at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.intro.is_none()
            && self.bullets.is_empty()
            && self.image_caption.is_none()
            && self.sections.iter().all(Section::is_empty)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub list: Vec<String>,
}

impl Section {
    pub fn with_heading(heading: impl Into<String>) -> Self {
        Section {
            heading: Some(heading.into()),
            ..Section::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heading.is_none() && self.body.is_none() && self.quote.is_none() && self.list.is_empty()
    }
}

/// Append `text` to an optional paragraph block, separated by a blank line
pub(crate) fn append_paragraph(target: &mut Option<String>, text: &str) {
    match target {
        Some(existing) => {
            existing.push_str("\n\n");
            existing.push_str(text);
        }
        None => *target = Some(text.to_string()),
    }
}
