//! Board configuration.
//!
//! ```json
//! {
//!   "storageKey": "trelloBoardState",
//!   "columns": ["column1", "column2", "column3"],
//!   "logFilter": "laneboard=info",
//!   "frameBudgetMs": 16.67
//! }
//! ```
//!
//! Every field is optional; missing fields take the defaults above.

use crate::constants::{DEFAULT_COLUMNS, DEFAULT_LOG_FILTER, DEFAULT_STORAGE_KEY, FRAME_BUDGET_MS};
use crate::types::ColumnId;
use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoardConfig {
    /// Key the board is persisted under
    pub storage_key: String,
    /// Column ids, in display order
    pub columns: Vec<ColumnId>,
    /// `tracing` filter installed by `BoardController::start`, overridden by
    /// `RUST_LOG`
    pub log_filter: String,
    /// Time budget for one placeholder recomputation
    pub frame_budget_ms: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            columns: DEFAULT_COLUMNS.iter().map(|c| ColumnId::from(*c)).collect(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            frame_budget_ms: FRAME_BUDGET_MS,
        }
    }
}

impl BoardConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Invalid board config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json_str(&content).with_context(|| format!("In config {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.storage_key.trim().is_empty(), "storageKey must not be empty");
        ensure!(!self.columns.is_empty(), "at least one column is required");

        let mut seen = HashSet::new();
        for column in &self.columns {
            ensure!(!column.as_str().trim().is_empty(), "column ids must not be blank");
            ensure!(seen.insert(column), "duplicate column id: {}", column);
        }

        ensure!(
            self.frame_budget_ms.is_finite() && self.frame_budget_ms > 0.0,
            "frameBudgetMs must be a positive number"
        );
        Ok(())
    }
}
