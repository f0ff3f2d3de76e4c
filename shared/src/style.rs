use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// URL prefix every style document is served under.
pub const STYLES_PATH: &str = "/styles/";

/// Named basemap styles. The set is closed; every variant has a document
/// under [`STYLES_PATH`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleId {
    Black,
    Contrast,
    Dark,
    Grayscale,
    #[default]
    Light,
    White,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    #[error("unknown style `{0}`")]
    UnknownStyle(String),
}

impl StyleId {
    /// Catalog order, as shown in the selector.
    pub const ALL: [StyleId; 6] = [
        Self::Black,
        Self::Contrast,
        Self::Dark,
        Self::Grayscale,
        Self::Light,
        Self::White,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Contrast => "contrast",
            Self::Dark => "dark",
            Self::Grayscale => "grayscale",
            Self::Light => "light",
            Self::White => "white",
        }
    }

    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Black => "black.json",
            Self::Contrast => "contrast.json",
            Self::Dark => "dark.json",
            Self::Grayscale => "grayscale.json",
            Self::Light => "light.json",
            Self::White => "white.json",
        }
    }

    /// Absolute URL path of the style document, e.g. `/styles/dark.json`.
    pub fn path(self) -> String {
        format!("{STYLES_PATH}{}", self.file_name())
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for StyleId {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.key() == s)
            .ok_or_else(|| StyleError::UnknownStyle(s.to_owned()))
    }
}

/// One catalog row as exposed over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleEntry {
    pub id: StyleId,
    pub path: String,
}

pub fn catalog() -> Vec<StyleEntry> {
    StyleId::ALL
        .into_iter()
        .map(|id| StyleEntry { id, path: id.path() })
        .collect()
}
