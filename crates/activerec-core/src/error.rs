//! Error types for activerec operations.

use std::fmt;

/// The primary error type for all activerec operations.
///
/// Every error aborts the current operation and surfaces to the immediate
/// caller. There is no retry logic at this layer; transient store failures
/// are the driver's concern.
#[derive(Debug)]
pub enum Error {
    /// Configuration errors (empty table name, empty class name, bad setup)
    Config(ConfigError),
    /// Statement execution errors reported by the driver
    Query(QueryError),
    /// Typed access requested a kind different from the stored value's kind
    Type(TypeError),
    /// Load-by-id found zero rows
    NotFound {
        /// Table that was queried
        table: String,
        /// Primary key value that matched nothing
        id: i64,
    },
    /// Association traversal attempted on a record not yet loaded
    NotLoaded {
        /// Class name of the offending record
        class_name: String,
    },
    /// Row decoding encountered a declared column type with no mapping
    UnsupportedColumnType {
        /// Column whose declared type was unhandled
        column: String,
        /// The declared type name as reported by the driver
        declared: String,
    },
    /// Metadata lookup for a mapped type that was never registered
    UnknownTable {
        /// The class name that has no registered table descriptor
        type_name: String,
    },
}

#[derive(Debug)]
pub struct ConfigError {
    pub message: String,
}

#[derive(Debug)]
pub struct QueryError {
    pub message: String,
    pub sql: Option<String>,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

#[derive(Debug)]
pub struct TypeError {
    pub expected: &'static str,
    pub actual: String,
    pub column: Option<String>,
}

impl Error {
    /// Shorthand for a configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(ConfigError {
            message: message.into(),
        })
    }

    /// Shorthand for a driver query error with a message.
    pub fn query(message: impl Into<String>) -> Self {
        Error::Query(QueryError {
            message: message.into(),
            sql: None,
            source: None,
        })
    }

    /// Get the SQL that caused this error, if available.
    pub fn sql(&self) -> Option<&str> {
        match self {
            Error::Query(q) => q.sql.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e.message),
            Error::Query(e) => {
                if let Some(sql) = &e.sql {
                    write!(f, "Query error: {} (sql: {})", e.message, sql)
                } else {
                    write!(f, "Query error: {}", e.message)
                }
            }
            Error::Type(e) => {
                if let Some(col) = &e.column {
                    write!(
                        f,
                        "Type error in column '{}': expected {}, found {}",
                        col, e.expected, e.actual
                    )
                } else {
                    write!(f, "Type error: expected {}, found {}", e.expected, e.actual)
                }
            }
            Error::NotFound { table, id } => {
                write!(f, "Record not found in '{}' with id {}", table, id)
            }
            Error::NotLoaded { class_name } => {
                write!(f, "{} instance not loaded", class_name)
            }
            Error::UnsupportedColumnType { column, declared } => {
                write!(
                    f,
                    "Unhandled declared type '{}' for column '{}'",
                    declared, column
                )
            }
            Error::UnknownTable { type_name } => {
                write!(f, "No table registered for type '{}'", type_name)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Query(e) => e
                .source
                .as_deref()
                .map(|err| err as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(col) = &self.column {
            write!(
                f,
                "expected {} for column '{}', found {}",
                self.expected, col, self.actual
            )
        } else {
            write!(f, "expected {}, found {}", self.expected, self.actual)
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

impl From<QueryError> for Error {
    fn from(err: QueryError) -> Self {
        Error::Query(err)
    }
}

impl From<TypeError> for Error {
    fn from(err: TypeError) -> Self {
        Error::Type(err)
    }
}

/// Result type alias for activerec operations.
pub type Result<T> = std::result::Result<T, Error>;
