//! Administrator accounts.

use crate::domain::{hash_password, verify_password, Admin};
use crate::error::AppError;
use crate::infra::DbConnection;

/// Fails with `Conflict` when the username is taken.
pub fn admin_create(
    conn: &mut dyn DbConnection,
    username: &str,
    password: &str,
) -> Result<Admin, AppError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::Validation("username is required".into()));
    }
    let row = conn
        .fetch_optional(
            "INSERT INTO admins (username, password) VALUES (?, ?) RETURNING id, username, password, created_at",
            &[username.into(), hash_password(password).into()],
        )?
        .ok_or_else(|| AppError::Db("insert returned no row".into()))?;
    Admin::from_row(&row)
}

pub fn admin_authenticate(
    conn: &mut dyn DbConnection,
    username: &str,
    password: &str,
) -> Result<Admin, AppError> {
    let admin = conn
        .fetch_optional(
            "SELECT id, username, password, created_at FROM admins WHERE username = ?",
            &[username.trim().into()],
        )?
        .map(|r| Admin::from_row(&r))
        .transpose()?
        .ok_or(AppError::Unauthorized)?;
    if !verify_password(password, &admin.password) {
        return Err(AppError::Unauthorized);
    }
    Ok(admin)
}

pub fn admin_count(conn: &mut dyn DbConnection) -> Result<i64, AppError> {
    conn.fetch_optional("SELECT COUNT(*) AS n FROM admins", &[])?
        .map(|r| r.get_i64("n"))
        .unwrap_or(Ok(0))
}
