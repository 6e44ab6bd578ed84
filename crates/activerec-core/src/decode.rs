//! Decoding raw result rows into attribute maps.
//!
//! This is the only place declared column type names are interpreted.
//! The lifecycle layer never sees driver types; it consumes the
//! [`Attributes`] produced here.

use crate::attributes::Attributes;
use crate::date::Date;
use crate::error::{Error, Result, TypeError};
use crate::value::Value;

/// One column of a raw result row, as reported by the driver.
#[derive(Debug, Clone, Copy)]
pub struct RawColumn<'a> {
    /// Column name
    pub name: &'a str,
    /// Declared type name, if the driver could determine it
    pub declared_type: Option<&'a str>,
    /// Cell content as text, or `None` for NULL
    pub text: Option<&'a str>,
}

impl<'a> RawColumn<'a> {
    pub fn new(name: &'a str, declared_type: Option<&'a str>, text: Option<&'a str>) -> Self {
        Self {
            name,
            declared_type,
            text,
        }
    }
}

/// Decode one cell according to its declared type name (case-insensitive).
///
/// Policy:
/// - `INTEGER` parses the cell as a 64-bit integer
/// - `FLOAT` parses the cell as a 64-bit float
/// - `TEXT` takes the cell verbatim
/// - `DATE` parses the cell as ISO-8601 `YYYY-MM-DD`
/// - no declared type: treat the cell as raw text
/// - anything else is [`Error::UnsupportedColumnType`]
///
/// A NULL cell decodes as [`Value::Null`] for every supported type.
pub fn decode_column(column: &RawColumn<'_>) -> Result<Value> {
    let Some(declared) = column.declared_type else {
        // The driver could not determine the declared type. Either the
        // cell itself is NULL or the column has no schema type; a present
        // cell is passed through as raw text.
        return Ok(match column.text {
            Some(text) => Value::Text(text.to_string()),
            None => Value::Null,
        });
    };

    let Some(text) = column.text else {
        if is_supported_type(declared) {
            return Ok(Value::Null);
        }
        return Err(unsupported(column.name, declared));
    };

    if declared.eq_ignore_ascii_case("INTEGER") {
        return text.parse::<i64>().map(Value::Integer).map_err(|_| {
            Error::Type(TypeError {
                expected: "INTEGER cell",
                actual: text.to_string(),
                column: Some(column.name.to_string()),
            })
        });
    }

    if declared.eq_ignore_ascii_case("FLOAT") {
        return text.parse::<f64>().map(Value::Real).map_err(|_| {
            Error::Type(TypeError {
                expected: "FLOAT cell",
                actual: text.to_string(),
                column: Some(column.name.to_string()),
            })
        });
    }

    if declared.eq_ignore_ascii_case("TEXT") {
        return Ok(Value::Text(text.to_string()));
    }

    if declared.eq_ignore_ascii_case("DATE") {
        return Date::parse(text).map(Value::Date).map_err(|_| {
            Error::Type(TypeError {
                expected: "DATE cell in YYYY-MM-DD form",
                actual: text.to_string(),
                column: Some(column.name.to_string()),
            })
        });
    }

    Err(unsupported(column.name, declared))
}

/// Decode a full raw row into an attribute map.
pub fn decode_row<'a, I>(columns: I) -> Result<Attributes>
where
    I: IntoIterator<Item = RawColumn<'a>>,
{
    let mut attributes = Attributes::new();
    for column in columns {
        let value = decode_column(&column)?;
        attributes.set(column.name, value);
    }
    Ok(attributes)
}

fn is_supported_type(declared: &str) -> bool {
    declared.eq_ignore_ascii_case("INTEGER")
        || declared.eq_ignore_ascii_case("FLOAT")
        || declared.eq_ignore_ascii_case("TEXT")
        || declared.eq_ignore_ascii_case("DATE")
}

fn unsupported(column: &str, declared: &str) -> Error {
    Error::UnsupportedColumnType {
        column: column.to_string(),
        declared: declared.to_string(),
    }
}
