//! Domain records and credential handling.

pub mod models;
pub mod password;

pub use models::{Admin, AuditLog, Candidate, Constituency, Election, Vote, Voter};
pub use password::{hash_password, verify_password};
