//! Projected select items
//!
//! A select list is an ordered sequence of `SelectItem`s in source order.
//! The rewrite passes branch on capability (is this an average aggregate,
//! is this a star) via exhaustive matching, never on anything else.

use serde::{Deserialize, Serialize};

/// Aggregate function kinds understood by the cross-shard merge engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregateType {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateType {
    /// SQL spelling of the function name.
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateType::Count => "COUNT",
            AggregateType::Sum => "SUM",
            AggregateType::Avg => "AVG",
            AggregateType::Min => "MIN",
            AggregateType::Max => "MAX",
        }
    }
}

/// An aggregate projection, e.g. `AVG(score)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationItem {
    pub func: AggregateType,
    /// The argument expression, without the surrounding parentheses.
    pub inner_expression: String,
    pub alias: Option<String>,
    /// DISTINCT aggregates are resolved by a non-pushdown strategy downstream.
    pub distinct: bool,
    /// Companion aggregates attached during rewriting (COUNT/SUM for AVG),
    /// read back by the merge engine to recompute averages per group.
    pub derived: Vec<AggregationItem>,
}

impl AggregationItem {
    pub fn new(
        func: AggregateType,
        inner_expression: impl Into<String>,
        alias: Option<String>,
    ) -> Self {
        Self {
            func,
            inner_expression: inner_expression.into(),
            alias,
            distinct: false,
            derived: Vec::new(),
        }
    }

    pub fn new_distinct(
        func: AggregateType,
        inner_expression: impl Into<String>,
        alias: Option<String>,
    ) -> Self {
        Self {
            distinct: true,
            ..Self::new(func, inner_expression, alias)
        }
    }

    /// The textual form sent to shards, e.g. `COUNT(score)`.
    pub fn expression(&self) -> String {
        if self.distinct {
            format!("{}(DISTINCT {})", self.func.as_str(), self.inner_expression)
        } else {
            format!("{}({})", self.func.as_str(), self.inner_expression)
        }
    }

    pub fn is_average(&self) -> bool {
        self.func == AggregateType::Avg
    }
}

/// One projected expression in the select list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectItem {
    /// A plain expression with an optional alias.
    Expression {
        expression: String,
        alias: Option<String>,
    },
    /// An aggregate projection.
    Aggregation(AggregationItem),
    /// A DISTINCT projection covering a set of column labels.
    Distinct { column_labels: Vec<String> },
    /// `*`, or `owner.*` when qualified with a table name or alias.
    Star { owner: Option<String> },
}

impl SelectItem {
    /// The user-supplied alias, if any. Stars and DISTINCT projections
    /// cannot carry one.
    pub fn alias(&self) -> Option<&str> {
        match self {
            SelectItem::Expression { alias, .. } => alias.as_deref(),
            SelectItem::Aggregation(item) => item.alias.as_deref(),
            SelectItem::Distinct { .. } | SelectItem::Star { .. } => None,
        }
    }

    /// The textual expression this item projects.
    pub fn expression(&self) -> String {
        match self {
            SelectItem::Expression { expression, .. } => expression.clone(),
            SelectItem::Aggregation(item) => item.expression(),
            SelectItem::Distinct { column_labels } => {
                format!("DISTINCT {}", column_labels.join(", "))
            }
            SelectItem::Star { owner: Some(owner) } => format!("{owner}.*"),
            SelectItem::Star { owner: None } => "*".to_string(),
        }
    }
}
