//! The record lifecycle state machine.
//!
//! A [`Record`] binds one mapped type's attribute map to one table row.
//! Construction is cheap and side-effect-free; metadata resolution and
//! row fetching happen lazily, on first attribute access:
//!
//! - `Blank -> Prepared`: resolve table metadata, once per instance
//! - `Blank/Prepared -> Unsaved`: merge an attribute map for later insert
//! - `Prepared/Unsaved -> Loaded`: fetch the row addressed by the id
//! - `save`: insert when the id is the unsaved sentinel, update otherwise

use crate::mapped::Mapped;
use activerec_core::{Attributes, Connection, Date, Error, Result, Table, Value};
use std::fmt;
use std::marker::PhantomData;

/// Reserved id denoting "not yet persisted".
pub const UNSAVED: i64 = -1;

/// Lifecycle states, ordered: a state below `Loaded` has not round-tripped
/// through storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum State {
    Blank,
    Prepared,
    Unsaved,
    Loaded,
}

/// A generic record bound to the mapped type `T`.
///
/// The record owns its attribute map and borrows the connection per
/// operation; it never holds driver state between calls.
pub struct Record<T: Mapped> {
    state: State,
    id: i64,
    attributes: Attributes,
    table_name: String,
    primary_key: String,
    singular_name: String,
    _mapped: PhantomData<T>,
}

impl<T: Mapped> Record<T> {
    /// Construct a blank record with no id assigned.
    pub fn new() -> Self {
        Self::with_id(UNSAVED)
    }

    /// Construct a record addressing an existing row. The row is not
    /// fetched until an attribute is first accessed.
    pub fn with_id(id: i64) -> Self {
        Self {
            state: State::Blank,
            id,
            attributes: Attributes::new(),
            table_name: String::new(),
            primary_key: String::new(),
            singular_name: String::new(),
            _mapped: PhantomData,
        }
    }

    /// Construct a new, not-yet-persisted record from an attribute map.
    pub fn from_attributes<C, I, K, V>(conn: &mut C, pairs: I) -> Result<Self>
    where
        C: Connection + ?Sized,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut record = Self::new();
        record.init(conn, pairs)?;
        Ok(record)
    }

    /// One-time registration of `T`'s table descriptor. Must run before
    /// any instance of `T` performs I/O.
    pub fn setup<C: Connection + ?Sized>(conn: &mut C) -> Result<()> {
        let table = T::table();
        if table.table_name().is_empty() {
            return Err(Error::config(format!(
                "mapped type '{}' returned a table descriptor with an empty table name",
                T::CLASS_NAME
            )));
        }
        conn.set_table(T::CLASS_NAME, table)
    }

    /// Merge attributes into the map and mark the record unsaved.
    pub fn init<C, I, K, V>(&mut self, conn: &mut C, pairs: I) -> Result<&mut Self>
    where
        C: Connection + ?Sized,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.ensure_prepared(conn)?;
        self.attributes.merge(pairs);
        self.id = UNSAVED;
        self.state = State::Unsaved;
        Ok(self)
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn has_data(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Whether this record has not yet round-tripped through storage.
    pub fn new_record(&self) -> bool {
        self.state != State::Loaded
    }

    /// Non-loading, absent-safe peek at the in-memory attribute map.
    pub fn peek(&self, name: &str) -> Value {
        self.attributes.get(name)
    }

    /// Read one attribute by name, fetching the row first when an id is
    /// assigned and the record is not yet loaded.
    pub fn get<C: Connection + ?Sized>(&mut self, conn: &mut C, name: &str) -> Result<Value> {
        self.load_unless_new(conn)?;
        Ok(self.attributes.get(name))
    }

    /// Write one attribute by name, fetching the row first when an id is
    /// assigned and the record is not yet loaded.
    pub fn set<C: Connection + ?Sized>(
        &mut self,
        conn: &mut C,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<()> {
        self.load_unless_new(conn)?;
        self.attributes.set(name, value);
        Ok(())
    }

    /// Read an attribute that must hold an integer.
    pub fn integer<C: Connection + ?Sized>(&mut self, conn: &mut C, name: &str) -> Result<i64> {
        let value = self.get(conn, name)?;
        value.as_i64().map_err(|e| in_column(e, name))
    }

    /// Read an attribute that must hold text.
    pub fn text<C: Connection + ?Sized>(&mut self, conn: &mut C, name: &str) -> Result<String> {
        let value = self.get(conn, name)?;
        value
            .as_str()
            .map(str::to_string)
            .map_err(|e| in_column(e, name))
    }

    /// Read an attribute that must hold a float.
    pub fn floating_point<C: Connection + ?Sized>(
        &mut self,
        conn: &mut C,
        name: &str,
    ) -> Result<f64> {
        let value = self.get(conn, name)?;
        value.as_f64().map_err(|e| in_column(e, name))
    }

    /// Read an attribute that must hold a date.
    pub fn date<C: Connection + ?Sized>(&mut self, conn: &mut C, name: &str) -> Result<Date> {
        let value = self.get(conn, name)?;
        value.as_date().map_err(|e| in_column(e, name))
    }

    /// Persist the record: insert when no id is assigned yet, update in
    /// place otherwise.
    pub fn save<C: Connection + ?Sized>(&mut self, conn: &mut C) -> Result<bool> {
        self.ensure_prepared(conn)?;
        if self.id == UNSAVED {
            self.create(conn)
        } else {
            self.update(conn)
        }
    }

    /// Every record of `U` whose `<owner>_id` column matches this record's
    /// id. Requires the owner to be loaded; re-queries on every call.
    pub fn has_many<U: Mapped, C: Connection + ?Sized>(
        &self,
        conn: &mut C,
    ) -> Result<Vec<Record<U>>> {
        self.require_loaded()?;

        let table = conn.get_table(U::CLASS_NAME)?;
        let sql = format!(
            "SELECT * FROM {} WHERE {}_id = ?",
            table.table_name(),
            self.singular_name
        );
        let rows = conn.select_all(&sql, &[Value::Integer(self.id)])?;

        rows.into_iter()
            .map(|row| Record::loaded_from(&table, row.into_attributes()))
            .collect()
    }

    /// The single record of `U` whose primary key equals this record's id.
    ///
    /// Note the key semantics: the filter is on the target's primary key,
    /// not on a foreign-key column stored on this record. Suitable for
    /// one-to-one/parent lookups where the two ids coincide.
    pub fn belongs_to<U: Mapped, C: Connection + ?Sized>(&self, conn: &mut C) -> Result<Record<U>> {
        self.require_loaded()?;

        let table = conn.get_table(U::CLASS_NAME)?;
        let sql = format!(
            "SELECT * FROM {} WHERE {} = ?",
            table.table_name(),
            table.primary_key_name()
        );
        match conn.select_one(&sql, &[Value::Integer(self.id)])? {
            Some(row) if row.has_data() => Record::loaded_from(&table, row.into_attributes()),
            _ => Err(Error::NotFound {
                table: table.table_name().to_string(),
                id: self.id,
            }),
        }
    }

    /// Resolve table metadata for `T`, once. Safe to call repeatedly.
    pub fn ensure_prepared<C: Connection + ?Sized>(&mut self, conn: &mut C) -> Result<()> {
        if self.state >= State::Prepared {
            return Ok(());
        }

        if T::CLASS_NAME.is_empty() {
            return Err(Error::config(
                "mapped type has an empty class name; registration is broken",
            ));
        }

        tracing::debug!(class_name = T::CLASS_NAME, "preparing record type");

        let table = conn.get_table(T::CLASS_NAME)?;
        self.table_name = table.table_name().to_string();
        self.primary_key = table.primary_key_name().to_string();
        self.singular_name = T::CLASS_NAME.to_lowercase();
        self.state = State::Prepared;
        Ok(())
    }

    /// Fetch the addressed row unless already loaded. Requires an id.
    pub fn ensure_loaded<C: Connection + ?Sized>(&mut self, conn: &mut C) -> Result<()> {
        self.ensure_prepared(conn)?;
        if self.state == State::Loaded {
            return Ok(());
        }
        self.load(conn)
    }

    fn load_unless_new<C: Connection + ?Sized>(&mut self, conn: &mut C) -> Result<()> {
        self.ensure_prepared(conn)?;
        if self.id == UNSAVED {
            return Ok(());
        }
        self.ensure_loaded(conn)
    }

    fn require_loaded(&self) -> Result<()> {
        if self.state < State::Loaded {
            return Err(Error::NotLoaded {
                class_name: T::CLASS_NAME.to_string(),
            });
        }
        Ok(())
    }

    fn load<C: Connection + ?Sized>(&mut self, conn: &mut C) -> Result<()> {
        let sql = format!(
            "SELECT * FROM {} WHERE {} = ?",
            self.table_name, self.primary_key
        );

        tracing::debug!(table = %self.table_name, id = self.id, "loading record");

        match conn.select_one(&sql, &[Value::Integer(self.id)])? {
            Some(row) if row.has_data() => {
                self.attributes = row.into_attributes();
                self.state = State::Loaded;
                Ok(())
            }
            _ => Err(Error::NotFound {
                table: self.table_name.clone(),
                id: self.id,
            }),
        }
    }

    fn create<C: Connection + ?Sized>(&mut self, conn: &mut C) -> Result<bool> {
        let mut columns = Vec::new();
        let mut params = Vec::new();

        for (name, value) in self.attributes.iter() {
            if name == self.primary_key {
                continue;
            }
            columns.push(name);
            params.push(value.clone());
        }

        let sql = if columns.is_empty() {
            // No fields besides the key: let the store assign everything.
            format!(
                "INSERT INTO {} ({}) VALUES (NULL)",
                self.table_name, self.primary_key
            )
        } else {
            let placeholders = vec!["?"; columns.len()].join(", ");
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                self.table_name,
                columns.join(", "),
                placeholders
            )
        };

        tracing::debug!(table = %self.table_name, columns = columns.len(), "inserting record");

        self.id = conn.insert(&sql, &params)?;
        self.state = State::Loaded;
        Ok(true)
    }

    fn update<C: Connection + ?Sized>(&mut self, conn: &mut C) -> Result<bool> {
        self.ensure_loaded(conn)?;

        let mut assignments = Vec::new();
        let mut params = Vec::new();

        for (name, value) in self.attributes.iter() {
            if name == self.primary_key {
                continue;
            }
            assignments.push(format!("{} = ?", name));
            params.push(value.clone());
        }

        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?",
            self.table_name,
            assignments.join(", "),
            self.primary_key
        );
        params.push(Value::Integer(self.id));

        tracing::debug!(table = %self.table_name, id = self.id, "updating record");

        conn.execute(&sql, &params)
    }

    /// Build an already-loaded record directly from a fetched row.
    fn loaded_from(table: &Table, attributes: Attributes) -> Result<Self> {
        let id = attributes
            .get(table.primary_key_name())
            .as_i64()
            .map_err(|e| in_column(e, table.primary_key_name()))?;

        Ok(Self {
            state: State::Loaded,
            id,
            attributes,
            table_name: table.table_name().to_string(),
            primary_key: table.primary_key_name().to_string(),
            singular_name: T::CLASS_NAME.to_lowercase(),
            _mapped: PhantomData,
        })
    }
}

impl<T: Mapped> Default for Record<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Equality binds to provenance as well as content: ids, lifecycle states,
/// and the full attribute maps (absent-safe) must all match. A loaded and
/// an unsaved record with identical data are not equal.
impl<T: Mapped> PartialEq for Record<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.id != other.id {
            return false;
        }
        if self.state != other.state {
            return false;
        }
        if self.attributes.len() != other.attributes.len() {
            return false;
        }
        self.attributes
            .iter()
            .all(|(name, value)| *value == other.peek(name))
    }
}

impl<T: Mapped> fmt::Debug for Record<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("class_name", &T::CLASS_NAME)
            .field("state", &self.state)
            .field("id", &self.id)
            .field("attributes", &self.attributes)
            .finish()
    }
}

/// Renders the in-memory state only; no fetch is performed.
impl<T: Mapped> fmt::Display for Record<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", T::CLASS_NAME, self.attributes)
    }
}

fn in_column(err: Error, name: &str) -> Error {
    match err {
        Error::Type(mut te) => {
            te.column = Some(name.to_string());
            Error::Type(te)
        }
        other => other,
    }
}
