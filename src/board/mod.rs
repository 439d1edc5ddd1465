//! Board state - the authoritative column → cards model and its persistence.
//!
//! `BoardState` covers exactly the configured columns, in configured order.
//! It is mutated through the text operations here and through
//! [`crate::commit`] for moves; the controller persists it after each one.
//!
//! ## Serialized form
//!
//! ```text
//! { "column1": ["Card A", "Card B"], "column2": [], "column3": ["Card C"] }
//! ```
//!
//! Anything else (invalid JSON, `null`, a non-object, a column that is not a
//! list of strings) is treated as if nothing had been stored.

pub mod store;

use crate::error::{BoardError, BoardResult};
use crate::types::{Card, ColumnId};
use serde::Serialize;
use serde::ser::SerializeMap;
use std::collections::HashMap;
use store::KeyValueStore;

/// Ordered mapping from column id to its cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    order: Vec<ColumnId>,
    columns: HashMap<ColumnId, Vec<Card>>,
}

impl BoardState {
    /// Empty board over the given columns. Duplicate ids are collapsed.
    pub fn new<I, C>(columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnId>,
    {
        let mut order: Vec<ColumnId> = Vec::new();
        let mut map = HashMap::new();
        for id in columns {
            let id = id.into();
            if map.contains_key(&id) {
                continue;
            }
            map.insert(id.clone(), Vec::new());
            order.push(id);
        }
        Self { order, columns: map }
    }

    /// Configured column ids in board order.
    pub fn column_ids(&self) -> &[ColumnId] {
        &self.order
    }

    pub fn has_column(&self, column: &ColumnId) -> bool {
        self.columns.contains_key(column)
    }

    /// Cards of a column; empty for ids outside the configured set.
    pub fn cards(&self, column: &ColumnId) -> &[Card] {
        self.columns.get(column).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn card(&self, column: &ColumnId, index: usize) -> Option<&Card> {
        self.cards(column).get(index)
    }

    pub fn len(&self, column: &ColumnId) -> usize {
        self.cards(column).len()
    }

    /// Total number of cards across all columns.
    pub fn total_cards(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_cards() == 0
    }

    pub(crate) fn column_mut(&mut self, column: &ColumnId) -> Option<&mut Vec<Card>> {
        self.columns.get_mut(column)
    }

    fn existing_column_mut(&mut self, column: &ColumnId) -> BoardResult<&mut Vec<Card>> {
        self.columns
            .get_mut(column)
            .ok_or_else(|| BoardError::UnknownColumn(column.clone()))
    }

    // ==================== Text Operations ====================

    /// Append a card, returning its index.
    pub fn add_card(&mut self, column: &ColumnId, card: Card) -> BoardResult<usize> {
        let cards = self.existing_column_mut(column)?;
        cards.push(card);
        Ok(cards.len() - 1)
    }

    /// Replace the text of a card. Returns `false` when the text is unchanged.
    pub fn edit_card(&mut self, column: &ColumnId, index: usize, card: Card) -> BoardResult<bool> {
        let cards = self.existing_column_mut(column)?;
        let len = cards.len();
        let slot = cards.get_mut(index).ok_or_else(|| BoardError::CardOutOfRange {
            column: column.clone(),
            index,
            len,
        })?;
        if *slot == card {
            return Ok(false);
        }
        *slot = card;
        Ok(true)
    }

    /// Remove a card, returning it.
    pub fn delete_card(&mut self, column: &ColumnId, index: usize) -> BoardResult<Card> {
        let cards = self.existing_column_mut(column)?;
        if index >= cards.len() {
            return Err(BoardError::CardOutOfRange {
                column: column.clone(),
                index,
                len: cards.len(),
            });
        }
        Ok(cards.remove(index))
    }

    // ==================== Serialization ====================

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a stored board over the configured columns.
    ///
    /// Columns missing from the stored map start empty, stored columns that
    /// are not configured are dropped, and blank cards are skipped.
    pub fn from_json<I, C>(json: &str, columns: I) -> Result<Self, serde_json::Error>
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnId>,
    {
        let stored: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
        let mut board = Self::new(columns);

        for (id, texts) in stored {
            let id = ColumnId::from(id);
            let Some(cards) = board.columns.get_mut(&id) else {
                tracing::info!(column = %id, "Dropping stored column that is not configured");
                continue;
            };
            for text in texts {
                match Card::new(&text) {
                    Ok(card) => cards.push(card),
                    Err(_) => tracing::warn!(column = %id, "Skipping blank stored card"),
                }
            }
        }

        Ok(board)
    }

    // ==================== Persistence ====================

    /// Load the board stored under `key`, falling back to an empty board.
    ///
    /// Never fails: a read error, a missing entry and a corrupted entry all
    /// yield the default board.
    pub fn load<S, I, C>(store: &S, key: &str, columns: I) -> Self
    where
        S: KeyValueStore + ?Sized,
        I: IntoIterator<Item = C>,
        C: Into<ColumnId>,
    {
        let columns: Vec<ColumnId> = columns.into_iter().map(Into::into).collect();

        let stored = match store.get(key) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Failed to read stored board, starting empty: {}", e);
                None
            }
        };

        let Some(json) = stored else {
            tracing::info!(key, "No stored board, starting empty");
            return Self::new(columns);
        };

        match Self::from_json(&json, columns.iter().cloned()) {
            Ok(board) => {
                tracing::info!(key, cards = board.total_cards(), "Loaded board");
                board
            }
            Err(e) => {
                tracing::warn!("Stored board is corrupted, starting empty: {}", e);
                Self::new(columns)
            }
        }
    }

    /// Serialize the whole board and write it under `key`.
    pub fn save<S>(&self, store: &mut S, key: &str) -> BoardResult<()>
    where
        S: KeyValueStore + ?Sized,
    {
        let json = self.to_json()?;
        store.set(key, &json)?;
        Ok(())
    }
}

impl Serialize for BoardState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for id in &self.order {
            map.serialize_entry(id, self.cards(id))?;
        }
        map.end()
    }
}
