pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;

pub use config::DbConfig;
pub use domain::hash_password;
pub use error::AppError;
pub use infra::{get_constituencies, init_db, open};
