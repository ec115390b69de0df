//! Poem kinds and saved-poem records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The fixed set of poem forms, each with its own timer and draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoemKind {
    Sonnet,
    Haiku,
    Limerick,
    Acrostic,
    Freeverse,
}

impl PoemKind {
    /// All kinds, in display order.
    pub const ALL: [PoemKind; 5] = [
        PoemKind::Sonnet,
        PoemKind::Haiku,
        PoemKind::Limerick,
        PoemKind::Acrostic,
        PoemKind::Freeverse,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PoemKind::Sonnet => "sonnet",
            PoemKind::Haiku => "haiku",
            PoemKind::Limerick => "limerick",
            PoemKind::Acrostic => "acrostic",
            PoemKind::Freeverse => "freeverse",
        }
    }

    /// Capitalized key, used in notifications and the saved list.
    pub fn display_name(self) -> &'static str {
        match self {
            PoemKind::Sonnet => "Sonnet",
            PoemKind::Haiku => "Haiku",
            PoemKind::Limerick => "Limerick",
            PoemKind::Acrostic => "Acrostic",
            PoemKind::Freeverse => "Freeverse",
        }
    }

    /// Storage key holding this kind's draft.
    pub fn draft_key(self) -> String {
        format!("draft_{}", self.as_str())
    }
}

impl fmt::Display for PoemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PoemKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        PoemKind::ALL
            .into_iter()
            .find(|k| k.as_str() == needle)
            .ok_or_else(|| ValidationError::UnknownPoemKind(s.trim().to_string()))
    }
}

/// An immutable snapshot of a poem appended to the saved history.
///
/// Serialized as `{type, content, date, timestamp}` where `date` is ISO-8601
/// and `timestamp` is epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPoem {
    #[serde(rename = "type")]
    pub kind: PoemKind,
    pub content: String,
    pub date: DateTime<Utc>,
    pub timestamp: i64,
}

impl SavedPoem {
    pub fn new(kind: PoemKind, content: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            kind,
            content: content.into(),
            date: at,
            timestamp: at.timestamp_millis(),
        }
    }
}
