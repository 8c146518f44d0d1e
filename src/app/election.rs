//! Elections scoped to one constituency.

use crate::domain::Election;
use crate::error::AppError;
use crate::infra::DbConnection;
use chrono::NaiveDateTime;
use serde::Deserialize;

const ELECTION_COLUMNS: &str =
    "id, title, description, constituency, start_time, end_time, status, created_at";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionCreateReq {
    pub title: String,
    pub description: Option<String>,
    pub constituency: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: String,
}

pub fn election_create(
    conn: &mut dyn DbConnection,
    req: ElectionCreateReq,
) -> Result<Election, AppError> {
    let title = req.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("title is required".into()));
    }
    if req.end_time <= req.start_time {
        return Err(AppError::Validation(
            "end_time must be after start_time".into(),
        ));
    }
    let row = conn
        .fetch_optional(
            &format!(
                "INSERT INTO elections (title, description, constituency, start_time, end_time, status) VALUES (?, ?, ?, ?, ?, ?) RETURNING {}",
                ELECTION_COLUMNS
            ),
            &[
                title.into(),
                req.description.into(),
                req.constituency.trim().into(),
                req.start_time.into(),
                req.end_time.into(),
                req.status.trim().into(),
            ],
        )?
        .ok_or_else(|| AppError::Db("insert returned no row".into()))?;
    Election::from_row(&row)
}

pub fn election_get(conn: &mut dyn DbConnection, id: i64) -> Result<Election, AppError> {
    let row = conn
        .fetch_optional(
            &format!("SELECT {} FROM elections WHERE id = ?", ELECTION_COLUMNS),
            &[id.into()],
        )?
        .ok_or_else(|| AppError::NotFound(format!("election {}", id)))?;
    Election::from_row(&row)
}

pub fn election_list_by_constituency(
    conn: &mut dyn DbConnection,
    constituency: &str,
) -> Result<Vec<Election>, AppError> {
    conn.fetch(
        &format!(
            "SELECT {} FROM elections WHERE constituency = ? ORDER BY start_time DESC",
            ELECTION_COLUMNS
        ),
        &[constituency.into()],
    )?
    .iter()
    .map(Election::from_row)
    .collect()
}
