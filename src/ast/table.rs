//! Tables referenced by a statement

use serde::{Deserialize, Serialize};

/// A table referenced in the FROM clause, with an optional alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub alias: Option<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    pub fn with_alias(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }
}

/// The statement's referenced tables, looked up by name or alias.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tables(Vec<Table>);

impl Tables {
    pub fn new(tables: Vec<Table>) -> Self {
        Self(tables)
    }

    pub fn push(&mut self, table: Table) {
        self.0.push(table);
    }

    /// Find a table whose name or alias matches, case-insensitively.
    pub fn find(&self, name_or_alias: &str) -> Option<&Table> {
        self.0.iter().find(|table| {
            table.name.eq_ignore_ascii_case(name_or_alias)
                || table
                    .alias
                    .as_deref()
                    .is_some_and(|alias| alias.eq_ignore_ascii_case(name_or_alias))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
