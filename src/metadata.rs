//! Schema metadata lookup
//!
//! The rewrite only needs one question answered: does a table contain a
//! column with a given name. The host system supplies the answer through
//! `TableMetadata`; `SchemaMetadata` is the in-memory implementation used
//! by tests and single-process deployments.

use std::collections::HashMap;

/// Column-existence lookup against the sharded logical schema.
pub trait TableMetadata {
    fn contains_column(&self, table: &str, column: &str) -> bool;
}

/// In-memory table metadata: table name to column names.
#[derive(Debug, Clone, Default)]
pub struct SchemaMetadata {
    tables: HashMap<String, Vec<String>>,
}

impl SchemaMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_table(&mut self, table: &str, columns: &[&str]) {
        self.tables.insert(
            table.to_string(),
            columns.iter().map(|column| column.to_string()).collect(),
        );
    }
}

impl TableMetadata for SchemaMetadata {
    fn contains_column(&self, table: &str, column: &str) -> bool {
        self.tables
            .get(table)
            .is_some_and(|columns| columns.iter().any(|c| c.eq_ignore_ascii_case(column)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_column_is_case_insensitive_on_column_name() {
        let mut metadata = SchemaMetadata::new();
        metadata.add_table("t_order", &["order_id", "user_id"]);

        assert!(metadata.contains_column("t_order", "user_id"));
        assert!(metadata.contains_column("t_order", "USER_ID"));
        assert!(!metadata.contains_column("t_order", "missing"));
        assert!(!metadata.contains_column("t_missing", "user_id"));
    }
}
