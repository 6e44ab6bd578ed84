//! Core types and traits for activerec.
//!
//! This crate provides the foundational abstractions for the record
//! mapping layer:
//!
//! - `Value` closed-variant column values with typed extraction
//! - `Date` calendar dates stored as ISO-8601 text
//! - `Attributes` ordered column-name to value map
//! - Row decoding driven by declared column type names
//! - `Table` metadata and its registry
//! - `Connection` trait for synchronous driver access

pub mod attributes;
pub mod connection;
pub mod date;
pub mod decode;
pub mod error;
pub mod row;
pub mod table;
pub mod value;

pub use attributes::Attributes;
pub use connection::Connection;
pub use date::Date;
pub use decode::{RawColumn, decode_column, decode_row};
pub use error::{ConfigError, Error, QueryError, Result, TypeError};
pub use row::Row;
pub use table::{Table, TableRegistry};
pub use value::Value;
