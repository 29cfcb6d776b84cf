//! Select-statement rewrite stage of a sharding SQL middleware
//!
//! Takes an already-parsed SELECT statement and rewrites it so that rows
//! fetched independently from multiple physical shards can be merged,
//! sorted, grouped, and deduplicated downstream without changing the
//! statement's visible result shape. The rewrite:
//!
//! - decomposes AVG aggregates into COUNT/SUM companion columns,
//! - injects ORDER BY / GROUP BY terms missing from the projection,
//! - synthesizes an implicit ORDER BY from GROUP BY,
//! - folds subquery routing conditions into the statement's routing set.
//!
//! Parsing, SQL-text rendering of the emitted tokens, and shard routing are
//! external collaborators; see [`metadata::TableMetadata`] for the one
//! lookup this crate consumes.

pub mod ast;
pub mod condition;
pub mod derived;
pub mod error;
pub mod metadata;
pub mod optimizer;
pub mod token;

pub use error::{Error, Result};
pub use optimizer::SelectOptimizer;
