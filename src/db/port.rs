//! # Database Port (Synchronous)
//!
//! The minimal read interface the user store needs from a database, plus
//! driver-neutral parameter and row types.
//!
//! - [`Param`]: a positional SQL parameter
//! - [`Value`] / [`Row`]: owned column values keyed by column name
//! - [`Db`]: `fetch_one`
//!
//! # Example
//! ```rust,ignore
//! use session_guard::db::port::{Db, Param};
//! use session_guard::params;
//!
//! let row = db.fetch_one("SELECT name FROM users WHERE id = ?", &params!["u1"])?;
//! ```
use std::collections::HashMap;

use anyhow::{bail, Result};

/// SQL parameter types passed to a query.
#[derive(Debug, Clone, PartialEq)]
pub enum Param<'a> {
    I64(i64),
    U64(u64),
    Str(&'a str),
    Null,
}

/// Owned column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    I64(i64),
    U64(u64),
    Str(String),
    Null,
}

/// A single result row (column name → value).
#[derive(Debug, Clone, Default)]
pub struct Row {
    cols: HashMap<String, Value>,
}

impl<'a> From<i64> for Param<'a> {
    fn from(x: i64) -> Self {
        Param::I64(x)
    }
}

impl<'a> From<u64> for Param<'a> {
    fn from(x: u64) -> Self {
        Param::U64(x)
    }
}

impl<'a> From<&'a str> for Param<'a> {
    fn from(x: &'a str) -> Self {
        Param::Str(x)
    }
}

impl<'a> From<Option<&'a str>> for Param<'a> {
    fn from(x: Option<&'a str>) -> Self {
        match x {
            Some(s) => Param::Str(s),
            None => Param::Null,
        }
    }
}

/// Builds a `Vec<Param>` from values convertible via `Param::from`.
#[macro_export]
macro_rules! params {
    ($($x:expr),* $(,)?) => {{
        let mut v = Vec::<$crate::db::port::Param>::new();
        $( v.push($crate::db::port::Param::from($x)); )*
        v
    }};
}

impl Row {
    /// Inserts a column (used by adapters and test fakes).
    pub fn insert(&mut self, key: impl Into<String>, val: Value) {
        self.cols.insert(key.into(), val);
    }

    /// Returns a `String` (only for `Value::Str`).
    pub fn get_string(&self, key: &str) -> Result<String> {
        match self.cols.get(key) {
            Some(Value::Str(s)) => Ok(s.clone()),
            _ => bail!("column `{key}` is not String"),
        }
    }

    /// Returns an optional `String` (`NULL` → `None`).
    pub fn get_string_opt(&self, key: &str) -> Result<Option<String>> {
        match self.cols.get(key) {
            Some(Value::Str(s)) => Ok(Some(s.clone())),
            Some(Value::Null) => Ok(None),
            Some(_) => bail!("column `{key}` is not String/NULL"),
            None => bail!("column `{key}` not found"),
        }
    }

    /// Returns the column as text, formatting integer keys.
    ///
    /// Identifier columns may be `VARCHAR` or `BIGINT` depending on schema.
    pub fn get_key(&self, key: &str) -> Result<String> {
        match self.cols.get(key) {
            Some(Value::Str(s)) => Ok(s.clone()),
            Some(Value::I64(v)) => Ok(v.to_string()),
            Some(Value::U64(v)) => Ok(v.to_string()),
            Some(Value::Null) => bail!("column `{key}` is NULL"),
            None => bail!("column `{key}` not found"),
        }
    }
}

/// Database abstraction (synchronous).
///
/// Async callers run these methods on a blocking thread.
pub trait Db: Send + Sync + 'static {
    fn fetch_one(&self, sql: &str, params: &[Param]) -> Result<Option<Row>>;
}
