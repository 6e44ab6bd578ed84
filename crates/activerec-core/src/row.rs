//! Fetched result rows.

use crate::attributes::Attributes;
use crate::decode::{self, RawColumn};
use crate::error::Result;
use crate::value::Value;

/// A single decoded row returned from the store.
///
/// Drivers build rows either from an already-decoded [`Attributes`] map or
/// straight from raw column data via [`Row::decode`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    attributes: Attributes,
}

impl Row {
    /// Wrap an already-decoded attribute map.
    pub fn new(attributes: Attributes) -> Self {
        Self { attributes }
    }

    /// Decode raw driver column data into a row.
    pub fn decode<'a, I>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawColumn<'a>>,
    {
        Ok(Self {
            attributes: decode::decode_row(columns)?,
        })
    }

    /// Whether the row carries any columns at all.
    pub fn has_data(&self) -> bool {
        !self.attributes.is_empty()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn into_attributes(self) -> Attributes {
        self.attributes
    }

    /// Absent-safe column read.
    pub fn get(&self, name: &str) -> Value {
        self.attributes.get(name)
    }
}

impl From<Attributes> for Row {
    fn from(attributes: Attributes) -> Self {
        Self::new(attributes)
    }
}
