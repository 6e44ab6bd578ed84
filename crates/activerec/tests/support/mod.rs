//! Scripted in-memory connection for integration tests.
//!
//! Results for selects are queued ahead of time; every trait call is
//! recorded so tests can assert on the exact SQL, parameters, and call
//! counts a record operation produced.

// Each test binary compiles this module separately and uses a different
// subset of the helpers.
#![allow(dead_code)]

use activerec::{Connection, Result, Row, Table, TableRegistry, Value};
use std::cell::RefCell;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Execute { sql: String, params: Vec<Value> },
    SelectOne { sql: String, params: Vec<Value> },
    SelectAll { sql: String, params: Vec<Value> },
    Insert { sql: String, params: Vec<Value> },
    GetTable(String),
    SetTable(String),
}

pub struct MockConnection {
    registry: TableRegistry,
    log: RefCell<Vec<Call>>,
    one_results: VecDeque<Option<Row>>,
    all_results: VecDeque<Vec<Row>>,
    next_insert_id: i64,
}

impl MockConnection {
    pub fn new() -> Self {
        Self {
            registry: TableRegistry::new(),
            log: RefCell::new(Vec::new()),
            one_results: VecDeque::new(),
            all_results: VecDeque::new(),
            next_insert_id: 1,
        }
    }

    /// Queue the result of the next `select_one` call.
    pub fn queue_one(&mut self, row: Option<Row>) {
        self.one_results.push_back(row);
    }

    /// Queue the result of the next `select_all` call.
    pub fn queue_all(&mut self, rows: Vec<Row>) {
        self.all_results.push_back(rows);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    pub fn count_get_table(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::GetTable(_)))
            .count()
    }

    pub fn count_set_table(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::SetTable(_)))
            .count()
    }

    pub fn count_select_one(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::SelectOne { .. }))
            .count()
    }

    /// The single insert issued during the test, if any.
    pub fn last_insert(&self) -> Option<(String, Vec<Value>)> {
        self.log.borrow().iter().rev().find_map(|c| match c {
            Call::Insert { sql, params } => Some((sql.clone(), params.clone())),
            _ => None,
        })
    }

    pub fn last_execute(&self) -> Option<(String, Vec<Value>)> {
        self.log.borrow().iter().rev().find_map(|c| match c {
            Call::Execute { sql, params } => Some((sql.clone(), params.clone())),
            _ => None,
        })
    }

    pub fn last_select_one(&self) -> Option<(String, Vec<Value>)> {
        self.log.borrow().iter().rev().find_map(|c| match c {
            Call::SelectOne { sql, params } => Some((sql.clone(), params.clone())),
            _ => None,
        })
    }

    pub fn last_select_all(&self) -> Option<(String, Vec<Value>)> {
        self.log.borrow().iter().rev().find_map(|c| match c {
            Call::SelectAll { sql, params } => Some((sql.clone(), params.clone())),
            _ => None,
        })
    }
}

impl Connection for MockConnection {
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<bool> {
        self.log.borrow_mut().push(Call::Execute {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
        Ok(true)
    }

    fn select_one(&mut self, sql: &str, params: &[Value]) -> Result<Option<Row>> {
        self.log.borrow_mut().push(Call::SelectOne {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
        Ok(self.one_results.pop_front().unwrap_or(None))
    }

    fn select_all(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        self.log.borrow_mut().push(Call::SelectAll {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
        Ok(self.all_results.pop_front().unwrap_or_default())
    }

    fn insert(&mut self, sql: &str, params: &[Value]) -> Result<i64> {
        self.log.borrow_mut().push(Call::Insert {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
        let id = self.next_insert_id;
        self.next_insert_id += 1;
        Ok(id)
    }

    fn get_table(&self, type_name: &str) -> Result<Table> {
        self.log
            .borrow_mut()
            .push(Call::GetTable(type_name.to_string()));
        self.registry.get(type_name).cloned()
    }

    fn set_table(&mut self, type_name: &str, table: Table) -> Result<()> {
        self.log
            .borrow_mut()
            .push(Call::SetTable(type_name.to_string()));
        self.registry.set(type_name, table);
        Ok(())
    }
}

/// Build a row from (column, value) pairs.
pub fn row<const N: usize>(pairs: [(&str, Value); N]) -> Row {
    Row::new(
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    )
}
