//! Statement rewriting for cross-shard execution
//!
//! One optimizer per statement kind; only SELECT needs rewriting today.

mod select_optimizer;

pub use select_optimizer::SelectOptimizer;
