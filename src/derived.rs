//! Derived column aliases
//!
//! Synthetic columns injected for cross-shard merging are named from a
//! category plus a per-category offset, so the merge engine can find them
//! by name in shard result sets.

use serde::{Deserialize, Serialize};

/// Alias category for a derived column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DerivedColumn {
    AvgCount,
    AvgSum,
    OrderBy,
    GroupBy,
}

impl DerivedColumn {
    fn prefix(&self) -> &'static str {
        match self {
            DerivedColumn::AvgCount => "AVG_DERIVED_COUNT_",
            DerivedColumn::AvgSum => "AVG_DERIVED_SUM_",
            DerivedColumn::OrderBy => "ORDER_BY_DERIVED_",
            DerivedColumn::GroupBy => "GROUP_BY_DERIVED_",
        }
    }

    /// Deterministic alias for the `offset`-th derived column of this
    /// category within one statement.
    pub fn alias(&self, offset: usize) -> String {
        format!("{}{}", self.prefix(), offset)
    }
}
