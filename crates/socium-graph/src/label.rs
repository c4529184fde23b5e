//! Node label validation.
//!
//! Labels arrive from request paths and bodies and end up interpolated
//! into Cypher text (Neo4j cannot bind a label as a parameter), so the
//! only way a label reaches a query string is through this newtype.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A caller-supplied label that failed validation.
#[derive(Debug, thiserror::Error)]
#[error("Invalid label: {0:?}")]
pub struct InvalidLabel(pub String);

/// A validated node label, safe to splice into query text.
///
/// Accepts `[A-Za-z][A-Za-z0-9_]*`; anything else is rejected rather
/// than filtered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    pub fn parse(raw: &str) -> Result<Self, InvalidLabel> {
        let mut chars = raw.chars();
        let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidLabel(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The label a node falls back to when the caller supplies none.
impl Default for Label {
    fn default() -> Self {
        Self("User".to_string())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Label::parse(&raw).map_err(serde::de::Error::custom)
    }
}
