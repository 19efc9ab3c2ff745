//! # MySQL Database Adapter
//!
//! [`Db`] implementation over a [`mysql::Pool`].
//!
//! Set `SQL_DEBUG=1` to emit each statement and its parameters as
//! `tracing` debug events.
//!
//! Only the pure conversion helpers are unit tested; query execution needs
//! a live server.

use std::sync::OnceLock;

use anyhow::{Context, Result};
use mysql::{prelude::*, Error as MyError, Params, Value as My};
use tracing::{debug, error};

use crate::config::db::DbPool;
use crate::config::env::read_flag;
use crate::db::port::{Db, Param, Row as GRow, Value};

static SQL_DEBUG: OnceLock<bool> = OnceLock::new();

#[inline]
fn sql_debug() -> bool {
    *SQL_DEBUG.get_or_init(|| read_flag("SQL_DEBUG", false))
}

#[inline]
fn mysql_err_summary(e: &MyError) -> String {
    match e {
        MyError::MySqlError(me) => format!(
            "code={}, state={}, message={}",
            me.code, me.state, me.message
        ),
        MyError::DriverError(de) => format!("driver={de:?}"),
        MyError::UrlError(ue) => format!("url={ue:?}"),
        MyError::IoError(ioe) => format!("io={ioe}"),
        MyError::CodecError(ce) => format!("codec={ce:?}"),
        MyError::FromValueError(fve) => format!("from_value={fve:?}"),
        MyError::FromRowError(fre) => format!("from_row={fre:?}"),
        // TLS variants only exist with some driver features.
        #[allow(unreachable_patterns)]
        other => format!("other={other}"),
    }
}

/// MySQL implementation of the [`Db`] port.
#[derive(Clone, Debug)]
pub struct MySqlDb {
    pool: DbPool,
}

impl MySqlDb {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Converts a single [`Param`] into a [`mysql::Value`].
    #[inline]
    fn to_mysql_value(p: &Param) -> My {
        match p {
            Param::I64(x) => My::Int(*x),
            Param::U64(x) => My::UInt(*x),
            Param::Str(s) => My::Bytes(s.as_bytes().to_vec()),
            Param::Null => My::NULL,
        }
    }

    #[inline]
    fn to_mysql_params(params_in: &[Param]) -> Params {
        let v: Vec<My> = params_in.iter().map(Self::to_mysql_value).collect();
        Params::Positional(v)
    }

    /// Converts a driver value into a port [`Value`].
    ///
    /// Only the shapes a user record needs are kept exactly; temporal and
    /// floating point columns are rendered as text.
    fn value_from_mysql(v: My) -> Value {
        match v {
            My::NULL => Value::Null,
            My::Int(i) => Value::I64(i),
            My::UInt(u) => Value::U64(u),
            My::Float(f) => Value::Str(f.to_string()),
            My::Double(f) => Value::Str(f.to_string()),
            My::Bytes(b) => match String::from_utf8(b) {
                Ok(s) => Value::Str(s),
                Err(e) => Value::Str(String::from_utf8_lossy(e.as_bytes()).into_owned()),
            },
            My::Date(y, m, d, hh, mm, ss, _micro) => {
                Value::Str(format!("{y:04}-{m:02}-{d:02} {hh:02}:{mm:02}:{ss:02}"))
            }
            My::Time(neg, days, hh, mm, ss, _micro) => {
                let sign = if neg { "-" } else { "" };
                Value::Str(format!("{sign}{days:03} {hh:02}:{mm:02}:{ss:02}"))
            }
        }
    }

    fn row_from_mysql(mut r: mysql::Row) -> GRow {
        let names: Vec<String> = r
            .columns_ref()
            .iter()
            .map(|c| c.name_str().to_string())
            .collect();

        let mut out = GRow::default();
        for (idx, name) in names.into_iter().enumerate() {
            let v = r
                .take_opt::<My, _>(idx)
                .unwrap_or(Ok(My::NULL))
                .unwrap_or(My::NULL);
            out.insert(name, Self::value_from_mysql(v));
        }
        out
    }
}

impl Db for MySqlDb {
    fn fetch_one(&self, sql: &str, params_in: &[Param]) -> Result<Option<GRow>> {
        let params = Self::to_mysql_params(params_in);
        let mut conn = self.pool.get_conn().context("get_conn failed")?;

        if sql_debug() {
            debug!(sql, params = ?params_in, "exec_first");
        }

        let res: std::result::Result<Option<mysql::Row>, MyError> = conn.exec_first(sql, params);
        if let Err(ref e) = res {
            error!(summary = %mysql_err_summary(e), "exec_first failed");
        }
        let row_opt = res.context("exec_first failed")?;

        Ok(row_opt.map(Self::row_from_mysql))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_mysql_value_maps_params() {
        assert_eq!(MySqlDb::to_mysql_value(&Param::I64(-7)), My::Int(-7));
        assert_eq!(MySqlDb::to_mysql_value(&Param::U64(9)), My::UInt(9));
        assert_eq!(
            MySqlDb::to_mysql_value(&Param::Str("abc")),
            My::Bytes(b"abc".to_vec())
        );
        assert_eq!(MySqlDb::to_mysql_value(&Param::Null), My::NULL);
    }

    #[test]
    fn to_mysql_params_is_positional_and_ordered() {
        let ps = [Param::Str("u1"), Param::U64(1)];

        match MySqlDb::to_mysql_params(&ps) {
            Params::Positional(v) => {
                assert_eq!(v, vec![My::Bytes(b"u1".to_vec()), My::UInt(1)]);
            }
            _ => panic!("expected Params::Positional"),
        }
    }

    #[test]
    fn value_from_mysql_keeps_text_and_integers() {
        assert_eq!(
            MySqlDb::value_from_mysql(My::Bytes(b"Alice".to_vec())),
            Value::Str("Alice".into())
        );
        assert_eq!(MySqlDb::value_from_mysql(My::Int(5)), Value::I64(5));
        assert_eq!(MySqlDb::value_from_mysql(My::UInt(5)), Value::U64(5));
        assert_eq!(MySqlDb::value_from_mysql(My::NULL), Value::Null);
    }

    #[test]
    fn value_from_mysql_renders_dates_as_text() {
        assert_eq!(
            MySqlDb::value_from_mysql(My::Date(2025, 8, 28, 15, 12, 34, 0)),
            Value::Str("2025-08-28 15:12:34".into())
        );
    }

    #[test]
    fn value_from_mysql_is_lossy_for_invalid_utf8() {
        match MySqlDb::value_from_mysql(My::Bytes(vec![0x61, 0xff])) {
            Value::Str(s) => assert!(s.starts_with('a')),
            other => panic!("expected Str, got {other:?}"),
        }
    }
}
