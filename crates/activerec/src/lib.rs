//! Active-record style table/row mapping with lazy loading.
//!
//! A [`Record<T>`] binds an in-memory attribute map to one row of `T`'s
//! table, inferring insert/update/load SQL from the map and deferring the
//! row fetch until an attribute is actually accessed. Mapped types declare
//! themselves through the [`Mapped`] trait and register once via
//! [`Record::setup`] before doing I/O.
//!
//! # Example
//!
//! ```no_run
//! use activerec::prelude::*;
//!
//! struct Person;
//!
//! impl Mapped for Person {
//!     const CLASS_NAME: &'static str = "Person";
//!
//!     fn table() -> Table {
//!         Table::new("people")
//!     }
//! }
//!
//! # fn run(conn: &mut dyn Connection) -> activerec::Result<()> {
//! Record::<Person>::setup(conn)?;
//!
//! let mut person =
//!     Record::<Person>::from_attributes(conn, [("name", "Alice"), ("city", "Berlin")])?;
//! person.save(conn)?;
//! assert!(!person.new_record());
//!
//! let mut other = Record::<Person>::with_id(person.id());
//! let name = other.text(conn, "name")?; // row fetched here
//! # Ok(())
//! # }
//! ```

pub mod mapped;
pub mod record;

pub use mapped::Mapped;
pub use record::{Record, UNSAVED};

pub use activerec_core::{
    Attributes, ConfigError, Connection, Date, Error, QueryError, RawColumn, Result, Row, Table,
    TableRegistry, TypeError, Value, decode_column, decode_row,
};

/// Convenience re-exports for application code.
pub mod prelude {
    pub use crate::mapped::Mapped;
    pub use crate::record::{Record, UNSAVED};
    pub use activerec_core::{Attributes, Connection, Date, Row, Table, Value};
}
