//! Per-mapped-type table metadata and its registry.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Descriptor for one mapped type's table: table name and primary key
/// column. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    table_name: String,
    primary_key: String,
}

impl Table {
    /// Create a descriptor with the default primary key column `id`.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            primary_key: "id".to_string(),
        }
    }

    /// Override the primary key column name.
    pub fn primary_key(mut self, name: impl Into<String>) -> Self {
        self.primary_key = name.into();
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn primary_key_name(&self) -> &str {
        &self.primary_key
    }
}

/// Process-wide registry mapping class-name strings to table descriptors.
///
/// A mapped type must register itself (through its setup call) before any
/// instance of that type performs I/O. The registry has no internal
/// locking; concurrent use needs an external synchronization layer.
#[derive(Debug, Clone, Default)]
pub struct TableRegistry {
    tables: HashMap<String, Table>,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a descriptor for a mapped type, replacing any previous one.
    pub fn set(&mut self, type_name: impl Into<String>, table: Table) {
        self.tables.insert(type_name.into(), table);
    }

    /// Look up a descriptor, failing when the type was never registered.
    pub fn get(&self, type_name: &str) -> Result<&Table> {
        self.tables.get(type_name).ok_or_else(|| Error::UnknownTable {
            type_name: type_name.to_string(),
        })
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.tables.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_defaults_primary_key_to_id() {
        let table = Table::new("people");
        assert_eq!(table.table_name(), "people");
        assert_eq!(table.primary_key_name(), "id");
    }

    #[test]
    fn table_primary_key_override() {
        let table = Table::new("tweets").primary_key("tweet_id");
        assert_eq!(table.primary_key_name(), "tweet_id");
    }

    #[test]
    fn registry_set_and_get() {
        let mut registry = TableRegistry::new();
        assert!(registry.is_empty());

        registry.set("Person", Table::new("people"));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("Person"));
        assert_eq!(registry.get("Person").unwrap().table_name(), "people");
    }

    #[test]
    fn registry_unknown_type_fails() {
        let registry = TableRegistry::new();
        let err = registry.get("Ghost").unwrap_err();
        assert!(matches!(err, Error::UnknownTable { .. }));
        assert!(err.to_string().contains("Ghost"));
    }

    #[test]
    fn registry_replaces_existing_descriptor() {
        let mut registry = TableRegistry::new();
        registry.set("Person", Table::new("people"));
        registry.set("Person", Table::new("persons"));
        assert_eq!(registry.get("Person").unwrap().table_name(), "persons");
        assert_eq!(registry.len(), 1);
    }
}
