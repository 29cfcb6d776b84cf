//! Statement model consumed by the rewrite passes
//!
//! Built from raw SQL by the (external) parser, rewritten in place by the
//! optimizer, then handed to the renderer and the shard router.

pub mod order_by;
pub mod select;
pub mod select_item;
pub mod table;

pub use order_by::{OrderDirection, OrderItem};
pub use select::SelectStatement;
pub use select_item::{AggregateType, AggregationItem, SelectItem};
pub use table::{Table, Tables};
