//! Dynamically-typed column values.

use crate::date::Date;
use crate::error::{Error, Result, TypeError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dynamically-typed value for one column's content.
///
/// This is a closed set: a value is either `Null` or exactly one concrete
/// kind. Extraction as a specific kind fails with a type error when the
/// stored kind differs; there is no silent coercion anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Absent / NULL value
    Null,

    /// 64-bit signed integer
    Integer(i64),

    /// 64-bit floating point
    Real(f64),

    /// UTF-8 text
    Text(String),

    /// Calendar date
    Date(Date),
}

impl Value {
    /// Check if this value is absent.
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get the type name of this value, for error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Integer(_) => "INTEGER",
            Value::Real(_) => "FLOAT",
            Value::Text(_) => "TEXT",
            Value::Date(_) => "DATE",
        }
    }

    /// Extract as a 64-bit integer.
    pub fn as_i64(&self) -> Result<i64> {
        match self {
            Value::Integer(v) => Ok(*v),
            other => Err(Error::Type(TypeError {
                expected: "INTEGER",
                actual: other.type_name().to_string(),
                column: None,
            })),
        }
    }

    /// Extract as a 64-bit float.
    pub fn as_f64(&self) -> Result<f64> {
        match self {
            Value::Real(v) => Ok(*v),
            other => Err(Error::Type(TypeError {
                expected: "FLOAT",
                actual: other.type_name().to_string(),
                column: None,
            })),
        }
    }

    /// Extract as a string slice.
    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::Text(s) => Ok(s),
            other => Err(Error::Type(TypeError {
                expected: "TEXT",
                actual: other.type_name().to_string(),
                column: None,
            })),
        }
    }

    /// Extract as a calendar date.
    pub fn as_date(&self) -> Result<Date> {
        match self {
            Value::Date(d) => Ok(*d),
            other => Err(Error::Type(TypeError {
                expected: "DATE",
                actual: other.type_name().to_string(),
                column: None,
            })),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Real(v) => write!(f, "{}", v),
            Value::Text(s) => write!(f, "{}", s),
            Value::Date(d) => write!(f, "{}", d),
        }
    }
}

// Conversion implementations

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Date> for Value {
    fn from(v: Date) -> Self {
        Value::Date(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}
