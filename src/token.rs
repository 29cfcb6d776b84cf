//! Rewrite tokens
//!
//! Tokens are positioned textual insertions appended by the rewrite passes
//! and consumed by the external renderer, which splices them into the
//! original SQL text to produce the per-shard query.

use serde::{Deserialize, Serialize};

/// A positioned insertion instruction. `start_index` is a character offset
/// into the original SQL text, supplied by the parser's anchors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewriteToken {
    /// Extra select-list columns, inserted after the original select list.
    /// Each item is a literal fragment such as `"dept AS GROUP_BY_DERIVED_0 "`.
    SelectItems {
        start_index: usize,
        items: Vec<String>,
    },
    /// An ORDER BY clause synthesized from GROUP BY, inserted after the end
    /// of the GROUP BY clause. The renderer reads the order items from the
    /// statement itself.
    OrderBy { start_index: usize },
}
