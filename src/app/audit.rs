//! Append-only audit trail.

use crate::domain::AuditLog;
use crate::error::AppError;
use crate::infra::DbConnection;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditAppendReq {
    pub action: String,
    pub user_type: String,
    pub user_id: i64,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub details: Option<String>,
}

pub fn audit_append(
    conn: &mut dyn DbConnection,
    req: AuditAppendReq,
) -> Result<AuditLog, AppError> {
    let action = req.action.trim();
    if action.is_empty() {
        return Err(AppError::Validation("action is required".into()));
    }
    // VARCHAR(45) fits an IPv6 address with an embedded IPv4 suffix.
    if req.ip_address.as_deref().is_some_and(|ip| ip.len() > 45) {
        return Err(AppError::Validation("ip_address too long".into()));
    }
    let row = conn
        .fetch_optional(
            "INSERT INTO audit_logs (action, user_type, user_id, ip_address, user_agent, details) VALUES (?, ?, ?, ?, ?, ?) RETURNING id, action, user_type, user_id, ip_address, user_agent, details, created_at",
            &[
                action.into(),
                req.user_type.trim().into(),
                req.user_id.into(),
                req.ip_address.into(),
                req.user_agent.into(),
                req.details.into(),
            ],
        )?
        .ok_or_else(|| AppError::Db("insert returned no row".into()))?;
    log::debug!("audit: {} by {} #{}", action, req.user_type, req.user_id);
    AuditLog::from_row(&row)
}

/// Newest first.
pub fn audit_list_recent(
    conn: &mut dyn DbConnection,
    limit: i64,
) -> Result<Vec<AuditLog>, AppError> {
    conn.fetch(
        "SELECT id, action, user_type, user_id, ip_address, user_agent, details, created_at FROM audit_logs ORDER BY id DESC LIMIT ?",
        &[limit.max(0).into()],
    )?
    .iter()
    .map(AuditLog::from_row)
    .collect()
}
