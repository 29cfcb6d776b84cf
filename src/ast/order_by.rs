//! ORDER BY and GROUP BY terms

use serde::{Deserialize, Serialize};

/// Sort direction, carried through for the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

/// One ORDER BY or GROUP BY term: either an ordinal index into the select
/// list, or a name reference with an optional table qualifier.
///
/// The coverage pass may assign a synthetic alias that the renderer and the
/// merge engine later reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    index: Option<usize>,
    owner: Option<String>,
    name: Option<String>,
    alias: Option<String>,
    pub direction: OrderDirection,
}

impl OrderItem {
    /// A term referencing a select-list position, e.g. `ORDER BY 2`.
    pub fn by_index(index: usize) -> Self {
        Self {
            index: Some(index),
            owner: None,
            name: None,
            alias: None,
            direction: OrderDirection::default(),
        }
    }

    /// A term referencing a column by name, optionally qualified.
    pub fn by_name(owner: Option<&str>, name: &str) -> Self {
        Self {
            index: None,
            owner: owner.map(str::to_string),
            name: Some(name.to_string()),
            alias: None,
            direction: OrderDirection::default(),
        }
    }

    /// A term referencing a select item by its alias, e.g. `ORDER BY total`
    /// against `SELECT SUM(x) AS total`.
    pub fn by_alias(alias: &str) -> Self {
        Self {
            index: None,
            owner: None,
            name: None,
            alias: Some(alias.to_string()),
            direction: OrderDirection::default(),
        }
    }

    pub fn descending(mut self) -> Self {
        self.direction = OrderDirection::Desc;
        self
    }

    pub fn is_index(&self) -> bool {
        self.index.is_some()
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn set_alias(&mut self, alias: String) {
        self.alias = Some(alias);
    }

    /// `owner.name`, or bare `name` when unqualified. None for ordinal terms.
    pub fn qualified_name(&self) -> Option<String> {
        let name = self.name.as_deref()?;
        Some(match &self.owner {
            Some(owner) => format!("{owner}.{name}"),
            None => name.to_string(),
        })
    }

    /// The label under which this term's value appears in a result row:
    /// the alias when present, otherwise the column name.
    pub fn column_label(&self) -> Option<&str> {
        self.alias.as_deref().or(self.name.as_deref())
    }
}
