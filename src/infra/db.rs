//! Connection factory, row access and schema bootstrap.

use crate::config::DbConfig;
use crate::error::AppError;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::sync::Arc;

use super::postgres::PgConnection;
use super::schema::{self, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME, SEED_STATE};
use super::sqlite::SqliteConnection;

/// `%.f` writes nothing for whole seconds, so `CURRENT_TIMESTAMP` values parse too.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Postgres,
}

/// Bind parameter / column value shared by both backends.
#[derive(Debug, Clone, PartialEq)]
pub enum DbValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Bool(bool),
    Timestamp(NaiveDateTime),
}

impl From<i64> for DbValue {
    fn from(v: i64) -> Self {
        DbValue::Integer(v)
    }
}

impl From<&str> for DbValue {
    fn from(v: &str) -> Self {
        DbValue::Text(v.to_string())
    }
}

impl From<String> for DbValue {
    fn from(v: String) -> Self {
        DbValue::Text(v)
    }
}

impl From<bool> for DbValue {
    fn from(v: bool) -> Self {
        DbValue::Bool(v)
    }
}

impl From<NaiveDateTime> for DbValue {
    fn from(v: NaiveDateTime) -> Self {
        DbValue::Timestamp(v)
    }
}

impl<T: Into<DbValue>> From<Option<T>> for DbValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(DbValue::Null)
    }
}

/// A fetched row; columns are addressable by name.
#[derive(Debug, Clone)]
pub struct Row {
    columns: Arc<HashMap<String, usize>>,
    values: Vec<DbValue>,
}

impl Row {
    pub(crate) fn new(columns: Arc<HashMap<String, usize>>, values: Vec<DbValue>) -> Self {
        Self { columns, values }
    }

    pub fn value(&self, column: &str) -> Result<&DbValue, AppError> {
        self.columns
            .get(column)
            .and_then(|&i| self.values.get(i))
            .ok_or_else(|| AppError::Db(format!("no such column: {}", column)))
    }

    pub fn get_i64(&self, column: &str) -> Result<i64, AppError> {
        match self.value(column)? {
            DbValue::Integer(v) => Ok(*v),
            other => Err(type_mismatch(column, "integer", other)),
        }
    }

    pub fn get_opt_string(&self, column: &str) -> Result<Option<String>, AppError> {
        match self.value(column)? {
            DbValue::Null => Ok(None),
            DbValue::Text(s) => Ok(Some(s.clone())),
            other => Err(type_mismatch(column, "text", other)),
        }
    }

    pub fn get_string(&self, column: &str) -> Result<String, AppError> {
        self.get_opt_string(column)?
            .ok_or_else(|| AppError::Db(format!("column {} is NULL", column)))
    }

    /// SQLite stores booleans as 0/1 integers.
    pub fn get_bool(&self, column: &str) -> Result<bool, AppError> {
        match self.value(column)? {
            DbValue::Bool(b) => Ok(*b),
            DbValue::Integer(v) => Ok(*v != 0),
            DbValue::Null => Ok(false),
            other => Err(type_mismatch(column, "boolean", other)),
        }
    }

    /// SQLite stores timestamps as `YYYY-MM-DD HH:MM:SS[.fff]` text.
    pub fn get_opt_timestamp(&self, column: &str) -> Result<Option<NaiveDateTime>, AppError> {
        match self.value(column)? {
            DbValue::Null => Ok(None),
            DbValue::Timestamp(t) => Ok(Some(*t)),
            DbValue::Text(s) => NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
                .map(Some)
                .map_err(|e| AppError::Db(format!("bad timestamp in {}: {}", column, e))),
            other => Err(type_mismatch(column, "timestamp", other)),
        }
    }

    pub fn get_timestamp(&self, column: &str) -> Result<NaiveDateTime, AppError> {
        self.get_opt_timestamp(column)?
            .ok_or_else(|| AppError::Db(format!("column {} is NULL", column)))
    }
}

fn type_mismatch(column: &str, expected: &str, got: &DbValue) -> AppError {
    AppError::Db(format!(
        "column {}: expected {}, got {:?}",
        column, expected, got
    ))
}

pub(crate) fn column_index<I>(names: I) -> Arc<HashMap<String, usize>>
where
    I: IntoIterator<Item = String>,
{
    Arc::new(names.into_iter().enumerate().map(|(i, n)| (n, i)).collect())
}

/// Capability set shared by the embedded and hosted backends.
/// Statements use `?` placeholders regardless of dialect.
pub trait DbConnection {
    fn dialect(&self) -> Dialect;

    /// Runs one statement, returns affected rows.
    fn execute(&mut self, sql: &str, params: &[DbValue]) -> Result<u64, AppError>;

    /// Runs several `;`-separated statements without parameters.
    fn execute_batch(&mut self, sql: &str) -> Result<(), AppError>;

    fn fetch(&mut self, sql: &str, params: &[DbValue]) -> Result<Vec<Row>, AppError>;

    fn fetch_optional(&mut self, sql: &str, params: &[DbValue]) -> Result<Option<Row>, AppError> {
        Ok(self.fetch(sql, params)?.into_iter().next())
    }

    fn begin(&mut self) -> Result<(), AppError> {
        self.execute_batch("BEGIN")
    }

    fn commit(&mut self) -> Result<(), AppError> {
        self.execute_batch("COMMIT")
    }

    fn rollback(&mut self) -> Result<(), AppError> {
        self.execute_batch("ROLLBACK")
    }

    fn close(self: Box<Self>) -> Result<(), AppError>;
}

/// Open a connection for the configured backend. Errors are logged and returned.
pub fn open(config: &DbConfig) -> Result<Box<dyn DbConnection>, AppError> {
    let result: Result<Box<dyn DbConnection>, AppError> = match config {
        DbConfig::Local { path } => {
            SqliteConnection::open(path).map(|c| Box::new(c) as Box<dyn DbConnection>)
        }
        DbConfig::Hosted { url } => {
            PgConnection::connect(url).map(|c| Box::new(c) as Box<dyn DbConnection>)
        }
    };
    result.map_err(|e| {
        log::error!("Database connection error: {}", e);
        e
    })
}

/// Run `f` inside a transaction; commit on success, roll back on error.
pub fn with_transaction<T, F>(conn: &mut dyn DbConnection, f: F) -> Result<T, AppError>
where
    F: FnOnce(&mut dyn DbConnection) -> Result<T, AppError>,
{
    conn.begin()?;
    match f(&mut *conn) {
        Ok(v) => {
            conn.commit()?;
            Ok(v)
        }
        Err(e) => {
            if let Err(rb) = conn.rollback() {
                log::warn!("Rollback failed: {}", rb);
            }
            Err(e)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InitReport {
    pub constituencies_inserted: u64,
    pub admin_created: bool,
}

/// Open, bootstrap and close. Safe to call on every startup.
pub fn init_db(config: &DbConfig) -> Result<InitReport, AppError> {
    let mut conn = open(config)?;
    let report = init_schema(conn.as_mut())?;
    conn.close()?;
    log::info!(
        "Schema ready on {} ({} constituencies inserted, admin created: {})",
        config.backend_name(),
        report.constituencies_inserted,
        report.admin_created
    );
    Ok(report)
}

/// Create tables and seed reference rows as one unit of work.
pub fn init_schema(conn: &mut dyn DbConnection) -> Result<InitReport, AppError> {
    let ddl = schema::create_tables_sql(conn.dialect());
    with_transaction(conn, |tx| {
        tx.execute_batch(&ddl)?;

        let mut report = InitReport::default();
        for name in schema::SEED_CONSTITUENCIES {
            report.constituencies_inserted += tx.execute(
                "INSERT INTO constituencies (name, state) VALUES (?, ?) ON CONFLICT (name) DO NOTHING",
                &[(*name).into(), SEED_STATE.into()],
            )?;
        }

        let existing = tx.fetch_optional(
            "SELECT id FROM admins WHERE username = ?",
            &[DEFAULT_ADMIN_USERNAME.into()],
        )?;
        if existing.is_none() {
            tx.execute(
                "INSERT INTO admins (username, password) VALUES (?, ?)",
                &[
                    DEFAULT_ADMIN_USERNAME.into(),
                    crate::domain::hash_password(DEFAULT_ADMIN_PASSWORD).into(),
                ],
            )?;
            log::info!(
                "Default admin created: username='{}'",
                DEFAULT_ADMIN_USERNAME
            );
            report.admin_created = true;
        }
        Ok(report)
    })
}

/// All constituency names, ascending.
pub fn get_constituencies(config: &DbConfig) -> Result<Vec<String>, AppError> {
    let mut conn = open(config)?;
    let names = crate::app::constituency_list_names(conn.as_mut())?;
    conn.close()?;
    Ok(names)
}

/// In-memory SQLite with the schema applied. For tests.
pub fn init_test_db() -> Result<Box<dyn DbConnection>, AppError> {
    let mut conn: Box<dyn DbConnection> = Box::new(SqliteConnection::open_in_memory()?);
    init_schema(conn.as_mut())?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: Vec<DbValue>) -> Row {
        Row::new(
            column_index(["id", "name", "flag", "at"].map(String::from)),
            values,
        )
    }

    #[test]
    fn row_reads_columns_by_name() {
        let r = row(vec![
            DbValue::Integer(7),
            DbValue::Text("Guntur".into()),
            DbValue::Integer(1),
            DbValue::Text("2026-01-02 03:04:05".into()),
        ]);
        assert_eq!(r.get_i64("id").unwrap(), 7);
        assert_eq!(r.get_string("name").unwrap(), "Guntur");
        assert!(r.get_bool("flag").unwrap());
        assert_eq!(
            r.get_timestamp("at").unwrap().to_string(),
            "2026-01-02 03:04:05"
        );
    }

    #[test]
    fn unknown_column_is_error() {
        let r = row(vec![DbValue::Null, DbValue::Null, DbValue::Null, DbValue::Null]);
        assert!(r.value("missing").is_err());
        assert_eq!(r.get_opt_string("name").unwrap(), None);
        assert!(r.get_string("name").is_err());
    }
}
