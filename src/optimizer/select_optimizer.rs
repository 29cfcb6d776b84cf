//! SELECT statement rewriting for cross-shard execution
//!
//! Rows come back from each shard independently, so the merge engine needs
//! every ORDER BY / GROUP BY value and every AVG's COUNT/SUM parts present
//! in each shard's result set. This optimizer runs three passes in fixed
//! order against one statement:
//!
//! 1. Derived columns — decompose AVG into COUNT+SUM companions and inject
//!    any ORDER BY / GROUP BY term not already covered by the projection,
//!    accumulating one select-list insertion token.
//! 2. Implicit ORDER BY — synthesize ORDER BY from GROUP BY when absent, so
//!    grouped rows can be stream-merged without buffering.
//! 3. Subquery conditions — fold routing conditions discovered inside
//!    subqueries into the statement's own routing-condition set.

use tracing::debug;

use crate::ast::select_item::{AggregateType, AggregationItem, SelectItem};
use crate::ast::{OrderItem, SelectStatement};
use crate::derived::DerivedColumn;
use crate::error::{Error, Result};
use crate::metadata::TableMetadata;
use crate::token::RewriteToken;

/// Rewrites one SELECT statement in place for cross-shard merging.
pub struct SelectOptimizer<'a, M: TableMetadata> {
    metadata: &'a M,
}

impl<'a, M: TableMetadata> SelectOptimizer<'a, M> {
    pub fn new(metadata: &'a M) -> Self {
        Self { metadata }
    }

    /// Run all rewrite passes. On error the statement is not well-formed for
    /// rendering and must not be sent to any shard.
    pub fn optimize(&self, statement: &mut SelectStatement) -> Result<()> {
        self.append_derived_columns(statement)?;
        Self::append_derived_order_by(statement);
        Self::merge_subquery_conditions(statement);
        Ok(())
    }

    /// Pass 1: AVG decomposition plus ORDER BY / GROUP BY coverage. All
    /// fragments accumulate into a single select-list token anchored right
    /// after the original select list; the token is only attached when at
    /// least one fragment was produced.
    fn append_derived_columns(&self, statement: &mut SelectStatement) -> Result<()> {
        // One past the last select-list character, then past the separator space.
        let start_index = statement.select_list_stop_index + 2;
        let mut fragments = Vec::new();

        Self::append_avg_derived_columns(&mut fragments, &mut statement.items);
        if !statement.order_by_items.is_empty() {
            let plan =
                self.derived_term_plan(statement, &statement.order_by_items, DerivedColumn::OrderBy)?;
            Self::apply_term_plan(&mut statement.order_by_items, plan, &mut fragments);
        }
        if !statement.group_by_items.is_empty() {
            let plan =
                self.derived_term_plan(statement, &statement.group_by_items, DerivedColumn::GroupBy)?;
            Self::apply_term_plan(&mut statement.group_by_items, plan, &mut fragments);
        }

        if !fragments.is_empty() {
            statement.add_token(RewriteToken::SelectItems {
                start_index,
                items: fragments,
            });
        }
        Ok(())
    }

    /// Attach COUNT and SUM companions to every AVG item so the merge engine
    /// can recompute per-group averages from partial shard results. The alias
    /// offset advances once per AVG item, not once per companion.
    fn append_avg_derived_columns(fragments: &mut Vec<String>, items: &mut [SelectItem]) {
        let mut offset = 0;
        for item in items.iter_mut() {
            let SelectItem::Aggregation(avg) = item else {
                continue;
            };
            if !avg.is_average() {
                continue;
            }
            let count_alias = DerivedColumn::AvgCount.alias(offset);
            let sum_alias = DerivedColumn::AvgSum.alias(offset);
            let count = AggregationItem::new(
                AggregateType::Count,
                avg.inner_expression.clone(),
                Some(count_alias.clone()),
            );
            let sum = AggregationItem::new(
                AggregateType::Sum,
                avg.inner_expression.clone(),
                Some(sum_alias.clone()),
            );
            // A DISTINCT average is resolved by a non-pushdown strategy
            // downstream: keep the companions for the merge engine, but add
            // no COUNT/SUM columns to the wire query.
            if !avg.distinct {
                fragments.push(format!("{} AS {} ", count.expression(), count_alias));
                fragments.push(format!("{} AS {} ", sum.expression(), sum_alias));
            }
            debug!(average = %avg.expression(), %count_alias, %sum_alias, "decomposed average");
            avg.derived.push(count);
            avg.derived.push(sum);
            offset += 1;
        }
    }

    /// Decide which terms need a derived column. Returns, per uncovered term,
    /// its index, its qualified name, and a fresh alias from `category`;
    /// offsets start at 0 per category.
    fn derived_term_plan(
        &self,
        statement: &SelectStatement,
        terms: &[OrderItem],
        category: DerivedColumn,
    ) -> Result<Vec<(usize, String, String)>> {
        let mut plan = Vec::new();
        for (index, term) in terms.iter().enumerate() {
            if self.is_covered(statement, term)? {
                continue;
            }
            let qualified = term.qualified_name().ok_or_else(|| {
                Error::InvariantViolation(
                    "uncovered order term has no qualified name".to_string(),
                )
            })?;
            let alias = category.alias(plan.len());
            plan.push((index, qualified, alias));
        }
        Ok(plan)
    }

    /// Write planned aliases onto the terms and emit their select-list
    /// fragments.
    fn apply_term_plan(
        terms: &mut [OrderItem],
        plan: Vec<(usize, String, String)>,
        fragments: &mut Vec<String>,
    ) {
        for (index, qualified, alias) in plan {
            debug!(%qualified, %alias, "injecting derived column");
            fragments.push(format!("{qualified} AS {alias} "));
            terms[index].set_alias(alias);
        }
    }

    /// Whether the term's value is already obtainable from the statement's
    /// own projection. Rules are checked in order, short-circuiting on the
    /// first match.
    fn is_covered(&self, statement: &SelectStatement, term: &OrderItem) -> Result<bool> {
        if term.is_index() {
            return Ok(true);
        }
        if self.covered_by_star_items(statement, term)? {
            return Ok(true);
        }
        Ok(Self::covered_by_select_items(statement, term))
    }

    /// Star coverage: a bare `*` covers everything; `owner.*` covers terms
    /// qualified with that owner; an unqualified term is covered when some
    /// qualified star's table is known by the metadata to contain a column
    /// with the term's name.
    fn covered_by_star_items(&self, statement: &SelectStatement, term: &OrderItem) -> Result<bool> {
        if statement.has_unqualified_star() {
            return Ok(true);
        }
        if let Some(owner) = term.owner() {
            return Ok(statement.has_qualified_star(owner));
        }
        for star_owner in statement.qualified_star_owners() {
            let name = term.name().ok_or_else(|| {
                Error::InvariantViolation(
                    "order term without a name matched against a qualified star".to_string(),
                )
            })?;
            if let Some(table) = statement.tables.find(star_owner)
                && self.metadata.contains_column(&table.name, name)
            {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Select-item coverage: a DISTINCT projection listing the term's column
    /// label, a case-insensitive alias match, or an unaliased expression
    /// equal to the term's qualified name.
    fn covered_by_select_items(statement: &SelectStatement, term: &OrderItem) -> bool {
        statement.items.iter().any(|item| {
            Self::covered_by_distinct_labels(item, term)
                || Self::is_same_alias(item, term)
                || Self::is_same_qualified_name(item, term)
        })
    }

    fn covered_by_distinct_labels(item: &SelectItem, term: &OrderItem) -> bool {
        let SelectItem::Distinct { column_labels } = item else {
            return false;
        };
        term.column_label()
            .is_some_and(|label| column_labels.iter().any(|candidate| candidate == label))
    }

    fn is_same_alias(item: &SelectItem, term: &OrderItem) -> bool {
        match (item.alias(), term.alias()) {
            (Some(item_alias), Some(term_alias)) => item_alias.eq_ignore_ascii_case(term_alias),
            _ => false,
        }
    }

    fn is_same_qualified_name(item: &SelectItem, term: &OrderItem) -> bool {
        item.alias().is_none()
            && term
                .qualified_name()
                .is_some_and(|qualified| item.expression().eq_ignore_ascii_case(&qualified))
    }

    /// Pass 2: shards return grouped rows independently; without an order
    /// matching the grouping key the merge engine would have to buffer every
    /// row. Copy GROUP BY terms into an empty ORDER BY.
    fn append_derived_order_by(statement: &mut SelectStatement) {
        if !statement.group_by_items.is_empty() && statement.order_by_items.is_empty() {
            let group_by = statement.group_by_items.clone();
            statement.order_by_items.extend(group_by);
            let start_index = statement.group_by_last_index + 1;
            statement.add_token(RewriteToken::OrderBy { start_index });
        }
    }

    /// Pass 3: a predicate found only inside a subquery can still constrain
    /// shard selection for the enclosing query. Union whole missing groups
    /// into the routing set; groups already present are never duplicated.
    fn merge_subquery_conditions(statement: &mut SelectStatement) {
        let SelectStatement {
            subquery_conditions,
            route_conditions,
            ..
        } = statement;
        for conditions in subquery_conditions.iter() {
            if !route_conditions.contains_all(conditions) {
                route_conditions.merge(conditions);
                debug!(
                    groups = route_conditions.len(),
                    "merged subquery routing conditions"
                );
            }
        }
    }
}
