//! Constituency lookups for selection widgets.

use crate::domain::Constituency;
use crate::error::AppError;
use crate::infra::DbConnection;

/// All names, ascending.
pub fn constituency_list_names(conn: &mut dyn DbConnection) -> Result<Vec<String>, AppError> {
    conn.fetch("SELECT name FROM constituencies ORDER BY name", &[])?
        .iter()
        .map(|r| r.get_string("name"))
        .collect()
}

pub fn constituency_list(conn: &mut dyn DbConnection) -> Result<Vec<Constituency>, AppError> {
    conn.fetch(
        "SELECT id, name, state, created_at FROM constituencies ORDER BY name",
        &[],
    )?
    .iter()
    .map(Constituency::from_row)
    .collect()
}

pub fn constituency_exists(conn: &mut dyn DbConnection, name: &str) -> Result<bool, AppError> {
    Ok(conn
        .fetch_optional(
            "SELECT id FROM constituencies WHERE name = ?",
            &[name.into()],
        )?
        .is_some())
}
