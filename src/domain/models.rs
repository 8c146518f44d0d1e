//! Row records for the voting tables.

use crate::error::AppError;
use crate::infra::Row;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constituency {
    pub id: i64,
    pub name: String,
    pub state: String,
    pub created_at: Option<NaiveDateTime>,
}

impl Constituency {
    pub fn from_row(row: &Row) -> Result<Self, AppError> {
        Ok(Self {
            id: row.get_i64("id")?,
            name: row.get_string("name")?,
            state: row.get_string("state")?,
            created_at: row.get_opt_timestamp("created_at")?,
        })
    }
}

/// Voter row. `password` holds the digest, never the plaintext.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Voter {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub constituency: String,
    pub is_verified: bool,
    pub created_at: Option<NaiveDateTime>,
}

impl Voter {
    pub fn from_row(row: &Row) -> Result<Self, AppError> {
        Ok(Self {
            id: row.get_i64("id")?,
            name: row.get_string("name")?,
            email: row.get_string("email")?,
            password: row.get_string("password")?,
            constituency: row.get_string("constituency")?,
            is_verified: row.get_bool("is_verified")?,
            created_at: row.get_opt_timestamp("created_at")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Admin {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: Option<NaiveDateTime>,
}

impl Admin {
    pub fn from_row(row: &Row) -> Result<Self, AppError> {
        Ok(Self {
            id: row.get_i64("id")?,
            username: row.get_string("username")?,
            password: row.get_string("password")?,
            created_at: row.get_opt_timestamp("created_at")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub id: i64,
    pub name: String,
    pub party: String,
    pub constituency: String,
    pub photo_path: Option<String>,
    pub symbol_path: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl Candidate {
    pub fn from_row(row: &Row) -> Result<Self, AppError> {
        Ok(Self {
            id: row.get_i64("id")?,
            name: row.get_string("name")?,
            party: row.get_string("party")?,
            constituency: row.get_string("constituency")?,
            photo_path: row.get_opt_string("photo_path")?,
            symbol_path: row.get_opt_string("symbol_path")?,
            created_at: row.get_opt_timestamp("created_at")?,
        })
    }
}

/// `status` is free-form text; the schema does not constrain it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Election {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub constituency: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: String,
    pub created_at: Option<NaiveDateTime>,
}

impl Election {
    pub fn from_row(row: &Row) -> Result<Self, AppError> {
        Ok(Self {
            id: row.get_i64("id")?,
            title: row.get_string("title")?,
            description: row.get_opt_string("description")?,
            constituency: row.get_string("constituency")?,
            start_time: row.get_timestamp("start_time")?,
            end_time: row.get_timestamp("end_time")?,
            status: row.get_string("status")?,
            created_at: row.get_opt_timestamp("created_at")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vote {
    pub id: i64,
    pub voter_id: i64,
    pub election_id: i64,
    pub candidate_id: i64,
    pub voted_at: Option<NaiveDateTime>,
}

impl Vote {
    pub fn from_row(row: &Row) -> Result<Self, AppError> {
        Ok(Self {
            id: row.get_i64("id")?,
            voter_id: row.get_i64("voter_id")?,
            election_id: row.get_i64("election_id")?,
            candidate_id: row.get_i64("candidate_id")?,
            voted_at: row.get_opt_timestamp("voted_at")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditLog {
    pub id: i64,
    pub action: String,
    pub user_type: String,
    pub user_id: i64,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub details: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl AuditLog {
    pub fn from_row(row: &Row) -> Result<Self, AppError> {
        Ok(Self {
            id: row.get_i64("id")?,
            action: row.get_string("action")?,
            user_type: row.get_string("user_type")?,
            user_id: row.get_i64("user_id")?,
            ip_address: row.get_opt_string("ip_address")?,
            user_agent: row.get_opt_string("user_agent")?,
            details: row.get_opt_string("details")?,
            created_at: row.get_opt_timestamp("created_at")?,
        })
    }
}
