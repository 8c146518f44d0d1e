//! Ballots. One vote per (voter, election), enforced by the schema.

use crate::domain::Vote;
use crate::error::AppError;
use crate::infra::DbConnection;
use std::collections::BTreeMap;

/// A repeat vote in the same election fails with `Conflict`.
pub fn vote_cast(
    conn: &mut dyn DbConnection,
    voter_id: i64,
    election_id: i64,
    candidate_id: i64,
) -> Result<Vote, AppError> {
    let row = conn
        .fetch_optional(
            "INSERT INTO votes (voter_id, election_id, candidate_id) VALUES (?, ?, ?) RETURNING id, voter_id, election_id, candidate_id, voted_at",
            &[voter_id.into(), election_id.into(), candidate_id.into()],
        )?
        .ok_or_else(|| AppError::Db("insert returned no row".into()))?;
    Vote::from_row(&row)
}

pub fn vote_has_voted(
    conn: &mut dyn DbConnection,
    voter_id: i64,
    election_id: i64,
) -> Result<bool, AppError> {
    Ok(conn
        .fetch_optional(
            "SELECT id FROM votes WHERE voter_id = ? AND election_id = ?",
            &[voter_id.into(), election_id.into()],
        )?
        .is_some())
}

/// candidate_id -> number of votes in the election.
pub fn vote_tally(
    conn: &mut dyn DbConnection,
    election_id: i64,
) -> Result<BTreeMap<i64, i64>, AppError> {
    let rows = conn.fetch(
        "SELECT candidate_id, COUNT(*) AS votes FROM votes WHERE election_id = ? GROUP BY candidate_id",
        &[election_id.into()],
    )?;
    let mut out = BTreeMap::new();
    for r in &rows {
        out.insert(r.get_i64("candidate_id")?, r.get_i64("votes")?);
    }
    Ok(out)
}
