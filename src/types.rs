//! Core types for the board.
//!
//! A board is a fixed set of named columns, each an ordered list of cards.
//! Cards are plain text with no identity beyond their payload and position.

use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ColumnId
// ============================================================================

/// Identifier of a column, one of the board's configured set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ColumnId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for ColumnId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ColumnId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// ============================================================================
// Card
// ============================================================================

/// A card's text payload. Never blank; surrounding whitespace is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Card(String);

impl Card {
    /// Build a card from user text, trimming it.
    ///
    /// Returns [`BoardError::EmptyCard`] when nothing is left after trimming.
    pub fn new(text: impl AsRef<str>) -> Result<Self, BoardError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(BoardError::EmptyCard);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn text(&self) -> &str {
        &self.0
    }

    pub fn into_text(self) -> String {
        self.0
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Card {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Card {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Card::new(text).map_err(serde::de::Error::custom)
    }
}
