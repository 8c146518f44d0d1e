//! Embedded store: a single SQLite file.

use super::db::{column_index, DbConnection, DbValue, Dialect, Row, TIMESTAMP_FORMAT};
use crate::error::AppError;
use rusqlite::types::{ToSqlOutput, Value, ValueRef};
use rusqlite::{params_from_iter, Connection, ToSql};
use std::path::Path;

pub struct SqliteConnection {
    conn: Connection,
}

impl SqliteConnection {
    /// Open (or create) the database file and enable foreign keys.
    pub fn open(path: &Path) -> Result<Self, AppError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| AppError::Connection(e.to_string()))?;
        }
        let conn = Connection::open(path).map_err(|e| AppError::Connection(e.to_string()))?;
        Self::configure(conn)
    }

    pub fn open_in_memory() -> Result<Self, AppError> {
        let conn = Connection::open_in_memory().map_err(|e| AppError::Connection(e.to_string()))?;
        Self::configure(conn)
    }

    fn configure(conn: Connection) -> Result<Self, AppError> {
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        Ok(Self { conn })
    }
}

impl ToSql for DbValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            DbValue::Null => ToSqlOutput::Owned(Value::Null),
            DbValue::Integer(v) => ToSqlOutput::Owned(Value::Integer(*v)),
            DbValue::Real(v) => ToSqlOutput::Owned(Value::Real(*v)),
            DbValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            DbValue::Bool(b) => ToSqlOutput::Owned(Value::Integer(i64::from(*b))),
            DbValue::Timestamp(t) => {
                ToSqlOutput::Owned(Value::Text(t.format(TIMESTAMP_FORMAT).to_string()))
            }
        })
    }
}

fn from_value_ref(v: ValueRef<'_>) -> DbValue {
    match v {
        ValueRef::Null => DbValue::Null,
        ValueRef::Integer(i) => DbValue::Integer(i),
        ValueRef::Real(f) => DbValue::Real(f),
        ValueRef::Text(t) => DbValue::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => DbValue::Text(String::from_utf8_lossy(b).into_owned()),
    }
}

impl DbConnection for SqliteConnection {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn execute(&mut self, sql: &str, params: &[DbValue]) -> Result<u64, AppError> {
        let n = self.conn.execute(sql, params_from_iter(params.iter()))?;
        Ok(n as u64)
    }

    fn execute_batch(&mut self, sql: &str) -> Result<(), AppError> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn fetch(&mut self, sql: &str, params: &[DbValue]) -> Result<Vec<Row>, AppError> {
        let mut stmt = self.conn.prepare(sql)?;
        let width = stmt.column_count();
        let columns = column_index(stmt.column_names().into_iter().map(String::from));
        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            let mut values = Vec::with_capacity(width);
            for i in 0..width {
                values.push(from_value_ref(r.get_ref(i)?));
            }
            out.push(Row::new(columns.clone(), values));
        }
        Ok(out)
    }

    fn close(self: Box<Self>) -> Result<(), AppError> {
        self.conn.close().map_err(|(_, e)| AppError::from(e))
    }
}
