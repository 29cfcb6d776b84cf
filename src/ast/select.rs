//! SELECT statement structure

use serde::{Deserialize, Serialize};

use super::order_by::OrderItem;
use super::select_item::SelectItem;
use super::table::Tables;
use crate::condition::ConditionSet;
use crate::token::RewriteToken;

/// A parsed SELECT statement, owned exclusively by the rewrite stage for
/// the duration of optimization and mutated in place.
///
/// `select_list_stop_index` and `group_by_last_index` are character offsets
/// into the original SQL text, supplied by the parser: the end of the select
/// list and the end of the GROUP BY clause respectively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectStatement {
    /// Projected items, insertion order = source order.
    pub items: Vec<SelectItem>,
    pub group_by_items: Vec<OrderItem>,
    pub order_by_items: Vec<OrderItem>,
    /// Tables referenced in the FROM clause.
    pub tables: Tables,
    /// Condition sets harvested from nested subqueries.
    pub subquery_conditions: Vec<ConditionSet>,
    /// The statement's own routing conditions, grown by the merge pass.
    pub route_conditions: ConditionSet,
    /// Rewrite tokens for the renderer, in emission order.
    pub tokens: Vec<RewriteToken>,
    pub select_list_stop_index: usize,
    pub group_by_last_index: usize,
}

impl SelectStatement {
    /// Whether the projection includes a bare `*`.
    pub fn has_unqualified_star(&self) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, SelectItem::Star { owner: None }))
    }

    /// Whether the projection includes `owner.*` for this exact owner,
    /// compared case-insensitively.
    pub fn has_qualified_star(&self, owner: &str) -> bool {
        self.qualified_star_owners()
            .any(|star_owner| star_owner.eq_ignore_ascii_case(owner))
    }

    /// Owners of all qualified star items, in projection order.
    pub fn qualified_star_owners(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match item {
            SelectItem::Star { owner: Some(owner) } => Some(owner.as_str()),
            _ => None,
        })
    }

    pub fn add_token(&mut self, token: RewriteToken) {
        self.tokens.push(token);
    }
}
