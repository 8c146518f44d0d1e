//! Candidates standing in a constituency.

use crate::domain::Candidate;
use crate::error::AppError;
use crate::infra::DbConnection;
use serde::Deserialize;

const CANDIDATE_COLUMNS: &str =
    "id, name, party, constituency, photo_path, symbol_path, created_at";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateCreateReq {
    pub name: String,
    pub party: String,
    pub constituency: String,
    pub photo_path: Option<String>,
    pub symbol_path: Option<String>,
}

pub fn candidate_create(
    conn: &mut dyn DbConnection,
    req: CandidateCreateReq,
) -> Result<Candidate, AppError> {
    let name = req.name.trim();
    let party = req.party.trim();
    if name.is_empty() || party.is_empty() {
        return Err(AppError::Validation("name and party are required".into()));
    }
    let row = conn
        .fetch_optional(
            &format!(
                "INSERT INTO candidates (name, party, constituency, photo_path, symbol_path) VALUES (?, ?, ?, ?, ?) RETURNING {}",
                CANDIDATE_COLUMNS
            ),
            &[
                name.into(),
                party.into(),
                req.constituency.trim().into(),
                req.photo_path.into(),
                req.symbol_path.into(),
            ],
        )?
        .ok_or_else(|| AppError::Db("insert returned no row".into()))?;
    Candidate::from_row(&row)
}

pub fn candidate_list_by_constituency(
    conn: &mut dyn DbConnection,
    constituency: &str,
) -> Result<Vec<Candidate>, AppError> {
    conn.fetch(
        &format!(
            "SELECT {} FROM candidates WHERE constituency = ? ORDER BY name",
            CANDIDATE_COLUMNS
        ),
        &[constituency.into()],
    )?
    .iter()
    .map(Candidate::from_row)
    .collect()
}
