//! Common test utilities for rewrite integration tests
#![allow(dead_code)]

use shard_rewrite::SelectOptimizer;
use shard_rewrite::ast::select_item::{AggregateType, AggregationItem, SelectItem};
use shard_rewrite::ast::{OrderItem, SelectStatement, Table};
use shard_rewrite::condition::{Condition, ConditionSet, Value};
use shard_rewrite::metadata::{SchemaMetadata, TableMetadata};
use shard_rewrite::token::RewriteToken;

/// Builds SELECT statements the way the external parser would hand them to
/// the rewrite stage.
pub struct StatementBuilder {
    statement: SelectStatement,
}

impl StatementBuilder {
    pub fn new() -> Self {
        Self {
            statement: SelectStatement::default(),
        }
    }

    pub fn column(mut self, expression: &str) -> Self {
        self.statement.items.push(SelectItem::Expression {
            expression: expression.to_string(),
            alias: None,
        });
        self
    }

    pub fn aliased_column(mut self, expression: &str, alias: &str) -> Self {
        self.statement.items.push(SelectItem::Expression {
            expression: expression.to_string(),
            alias: Some(alias.to_string()),
        });
        self
    }

    pub fn aggregation(mut self, func: AggregateType, inner: &str, alias: Option<&str>) -> Self {
        self.statement.items.push(SelectItem::Aggregation(
            AggregationItem::new(func, inner, alias.map(str::to_string)),
        ));
        self
    }

    pub fn avg(self, inner: &str, alias: Option<&str>) -> Self {
        self.aggregation(AggregateType::Avg, inner, alias)
    }

    pub fn avg_distinct(mut self, inner: &str, alias: Option<&str>) -> Self {
        self.statement.items.push(SelectItem::Aggregation(
            AggregationItem::new_distinct(AggregateType::Avg, inner, alias.map(str::to_string)),
        ));
        self
    }

    pub fn star(mut self, owner: Option<&str>) -> Self {
        self.statement.items.push(SelectItem::Star {
            owner: owner.map(str::to_string),
        });
        self
    }

    pub fn distinct(mut self, labels: &[&str]) -> Self {
        self.statement.items.push(SelectItem::Distinct {
            column_labels: labels.iter().map(|label| label.to_string()).collect(),
        });
        self
    }

    pub fn table(mut self, name: &str) -> Self {
        self.statement.tables.push(Table::new(name));
        self
    }

    pub fn aliased_table(mut self, name: &str, alias: &str) -> Self {
        self.statement.tables.push(Table::with_alias(name, alias));
        self
    }

    pub fn order_by(mut self, term: OrderItem) -> Self {
        self.statement.order_by_items.push(term);
        self
    }

    pub fn group_by(mut self, term: OrderItem) -> Self {
        self.statement.group_by_items.push(term);
        self
    }

    pub fn anchors(mut self, select_list_stop: usize, group_by_last: usize) -> Self {
        self.statement.select_list_stop_index = select_list_stop;
        self.statement.group_by_last_index = group_by_last;
        self
    }

    pub fn route_group(mut self, condition: Condition) -> Self {
        self.statement.route_conditions.add(condition.into());
        self
    }

    pub fn subquery_conditions(mut self, conditions: ConditionSet) -> Self {
        self.statement.subquery_conditions.push(conditions);
        self
    }

    pub fn build(self) -> SelectStatement {
        self.statement
    }
}

/// Optimize with empty schema metadata.
pub fn optimize(statement: &mut SelectStatement) {
    let metadata = SchemaMetadata::new();
    optimize_with(&metadata, statement);
}

pub fn optimize_with<M: TableMetadata>(metadata: &M, statement: &mut SelectStatement) {
    SelectOptimizer::new(metadata)
        .optimize(statement)
        .expect("rewrite failed");
}

/// The fragments of the statement's single select-list token, empty when no
/// such token was emitted.
pub fn select_list_fragments(statement: &SelectStatement) -> Vec<String> {
    statement
        .tokens
        .iter()
        .find_map(|token| match token {
            RewriteToken::SelectItems { items, .. } => Some(items.clone()),
            _ => None,
        })
        .unwrap_or_default()
}

pub fn equal_condition(owner: Option<&str>, column: &str, value: i64) -> Condition {
    Condition::equal(owner, column, Value::Integer(value))
}
