//! Routing conditions in disjunctive normal form
//!
//! A `ConditionSet` is an OR of conjunctive `ConditionGroup`s. The shard
//! router consumes the statement's set to decide which shards a query must
//! reach; the subquery-merge pass unions sets at whole-group granularity.

use serde::{Deserialize, Serialize};

/// A literal value compared against a sharding column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Value equality is by bits for floats so condition groups can be compared
/// as plain values; SQL NULL/NaN semantics are the router's concern.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Boolean(l), Self::Boolean(r)) => l == r,
            (Self::Integer(l), Self::Integer(r)) => l == r,
            (Self::Float(l), Self::Float(r)) => l.to_bits() == r.to_bits(),
            (Self::Text(l), Self::Text(r)) => l == r,
            (_, _) => false,
        }
    }
}

impl Eq for Value {}

/// Comparison operators the router understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionOperator {
    Equal,
    In,
    Between,
}

/// One predicate on a column, e.g. `o.user_id = 10`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub owner: Option<String>,
    pub column: String,
    pub operator: ConditionOperator,
    pub values: Vec<Value>,
}

impl Condition {
    pub fn equal(owner: Option<&str>, column: &str, value: Value) -> Self {
        Self {
            owner: owner.map(str::to_string),
            column: column.to_string(),
            operator: ConditionOperator::Equal,
            values: vec![value],
        }
    }

    pub fn in_list(owner: Option<&str>, column: &str, values: Vec<Value>) -> Self {
        Self {
            owner: owner.map(str::to_string),
            column: column.to_string(),
            operator: ConditionOperator::In,
            values,
        }
    }
}

/// A conjunctive (AND) group of predicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionGroup {
    pub conditions: Vec<Condition>,
}

impl ConditionGroup {
    pub fn new(conditions: Vec<Condition>) -> Self {
        Self { conditions }
    }
}

impl From<Condition> for ConditionGroup {
    fn from(condition: Condition) -> Self {
        Self::new(vec![condition])
    }
}

/// An OR of conjunctive groups. Membership and union operate on whole
/// groups, never on individual predicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionSet {
    groups: Vec<ConditionGroup>,
}

impl ConditionSet {
    pub fn new(groups: Vec<ConditionGroup>) -> Self {
        Self { groups }
    }

    pub fn add(&mut self, group: ConditionGroup) {
        self.groups.push(group);
    }

    pub fn groups(&self) -> &[ConditionGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn contains(&self, group: &ConditionGroup) -> bool {
        self.groups.contains(group)
    }

    pub fn contains_all(&self, other: &ConditionSet) -> bool {
        other.groups.iter().all(|group| self.contains(group))
    }

    /// Union the groups of `other` into this set, skipping groups already
    /// present. Insertion order of new groups is preserved.
    pub fn merge(&mut self, other: &ConditionSet) {
        for group in &other.groups {
            if !self.contains(group) {
                self.groups.push(group.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(column: &str, value: i64) -> ConditionGroup {
        Condition::equal(None, column, Value::Integer(value)).into()
    }

    #[test]
    fn merge_skips_present_groups() {
        let mut set = ConditionSet::new(vec![group("user_id", 1)]);
        let other = ConditionSet::new(vec![group("user_id", 1), group("user_id", 2)]);

        set.merge(&other);
        assert_eq!(set.len(), 2);

        // Merging again changes nothing.
        set.merge(&other);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn containment_is_group_granular() {
        let set = ConditionSet::new(vec![ConditionGroup::new(vec![
            Condition::equal(None, "user_id", Value::Integer(1)),
            Condition::equal(None, "order_id", Value::Integer(7)),
        ])]);

        // A group holding only one of the two predicates is a different group.
        assert!(!set.contains(&group("user_id", 1)));
    }

    #[test]
    fn float_values_compare_by_bits() {
        assert_eq!(Value::Float(1.5), Value::Float(1.5));
        assert_ne!(Value::Float(f64::NAN), Value::Float(0.0));
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
    }
}
