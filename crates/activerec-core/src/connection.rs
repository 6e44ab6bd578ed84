//! The database connection abstraction.
//!
//! This trait is the single seam between the record lifecycle and the
//! concrete driver. All calls are synchronous and blocking: each one holds
//! the calling thread until the store responds. Parameter binding uses
//! positional `?` placeholders with values supplied in order.

use crate::error::Result;
use crate::row::Row;
use crate::table::Table;
use crate::value::Value;

/// A synchronous database connection.
///
/// The trait is object-safe so tests can substitute a scripted mock. The
/// connection also carries the table-metadata registry; the lifecycle layer
/// resolves descriptors through [`get_table`](Connection::get_table) during
/// preparation.
pub trait Connection {
    /// Run a statement with no result set; the flag reports driver success.
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<bool>;

    /// Run a statement expected to return at most one row.
    fn select_one(&mut self, sql: &str, params: &[Value]) -> Result<Option<Row>>;

    /// Run a statement returning every matching row.
    fn select_all(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>>;

    /// Run an insert and return the newly generated primary-key value.
    fn insert(&mut self, sql: &str, params: &[Value]) -> Result<i64>;

    /// Look up the table descriptor registered for a mapped type.
    fn get_table(&self, type_name: &str) -> Result<Table>;

    /// Register a table descriptor for a mapped type.
    fn set_table(&mut self, type_name: &str, table: Table) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableRegistry;

    // Minimal stub proving the trait is object-safe and usable through
    // `&mut dyn Connection`.
    struct NullConnection {
        registry: TableRegistry,
    }

    impl Connection for NullConnection {
        fn execute(&mut self, _sql: &str, _params: &[Value]) -> Result<bool> {
            Ok(true)
        }

        fn select_one(&mut self, _sql: &str, _params: &[Value]) -> Result<Option<Row>> {
            Ok(None)
        }

        fn select_all(&mut self, _sql: &str, _params: &[Value]) -> Result<Vec<Row>> {
            Ok(Vec::new())
        }

        fn insert(&mut self, _sql: &str, _params: &[Value]) -> Result<i64> {
            Ok(1)
        }

        fn get_table(&self, type_name: &str) -> Result<Table> {
            self.registry.get(type_name).cloned()
        }

        fn set_table(&mut self, type_name: &str, table: Table) -> Result<()> {
            self.registry.set(type_name, table);
            Ok(())
        }
    }

    #[test]
    fn usable_as_trait_object() {
        let mut conn = NullConnection {
            registry: TableRegistry::new(),
        };
        let dyn_conn: &mut dyn Connection = &mut conn;

        dyn_conn.set_table("Person", Table::new("people")).unwrap();
        assert_eq!(
            dyn_conn.get_table("Person").unwrap().table_name(),
            "people"
        );
        assert!(dyn_conn.execute("DELETE FROM people", &[]).unwrap());
        assert!(dyn_conn.select_one("SELECT 1", &[]).unwrap().is_none());
        assert_eq!(dyn_conn.insert("INSERT", &[]).unwrap(), 1);
    }
}
