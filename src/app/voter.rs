//! Voter registration and login.

use super::constituency::constituency_exists;
use crate::domain::{hash_password, verify_password, Voter};
use crate::error::AppError;
use crate::infra::DbConnection;
use serde::Deserialize;

const VOTER_COLUMNS: &str =
    "id, name, email, password, constituency, is_verified, created_at";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterRegisterReq {
    pub name: String,
    pub email: String,
    pub password: String,
    pub constituency: String,
}

pub fn voter_register(
    conn: &mut dyn DbConnection,
    req: VoterRegisterReq,
) -> Result<Voter, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }
    let email = req.email.trim().to_lowercase();
    if !email.contains('@') {
        return Err(AppError::Validation("email is invalid".into()));
    }
    if req.password.is_empty() {
        return Err(AppError::Validation("password is required".into()));
    }
    let constituency = req.constituency.trim();
    if !constituency_exists(conn, constituency)? {
        return Err(AppError::NotFound(format!("constituency {}", constituency)));
    }

    let row = conn
        .fetch_optional(
            &format!(
                "INSERT INTO voters (name, email, password, constituency) VALUES (?, ?, ?, ?) RETURNING {}",
                VOTER_COLUMNS
            ),
            &[
                name.into(),
                email.as_str().into(),
                hash_password(&req.password).into(),
                constituency.into(),
            ],
        )?
        .ok_or_else(|| AppError::Db("insert returned no row".into()))?;
    Voter::from_row(&row)
}

pub fn voter_get_by_email(conn: &mut dyn DbConnection, email: &str) -> Result<Voter, AppError> {
    let email = email.trim().to_lowercase();
    let row = conn
        .fetch_optional(
            &format!("SELECT {} FROM voters WHERE email = ?", VOTER_COLUMNS),
            &[email.as_str().into()],
        )?
        .ok_or_else(|| AppError::NotFound(format!("voter {}", email)))?;
    Voter::from_row(&row)
}

/// Unknown email and wrong password both yield `Unauthorized`.
pub fn voter_authenticate(
    conn: &mut dyn DbConnection,
    email: &str,
    password: &str,
) -> Result<Voter, AppError> {
    match voter_get_by_email(conn, email) {
        Ok(v) if verify_password(password, &v.password) => Ok(v),
        Ok(_) | Err(AppError::NotFound(_)) => Err(AppError::Unauthorized),
        Err(e) => Err(e),
    }
}

pub fn voter_set_verified(
    conn: &mut dyn DbConnection,
    voter_id: i64,
    verified: bool,
) -> Result<(), AppError> {
    let n = conn.execute(
        "UPDATE voters SET is_verified = ? WHERE id = ?",
        &[verified.into(), voter_id.into()],
    )?;
    if n == 0 {
        return Err(AppError::NotFound(format!("voter {}", voter_id)));
    }
    Ok(())
}
