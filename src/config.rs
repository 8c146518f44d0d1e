//! Backend selection: embedded SQLite file or hosted PostgreSQL.

use crate::error::AppError;
use figment::providers::Env;
use figment::Figment;
use serde::Deserialize;
use std::path::PathBuf;

/// File name of the embedded store, relative to the working directory.
pub const LOCAL_DB_FILE: &str = "voting_system.db";

const LEGACY_SCHEME: &str = "postgres://";
const MODERN_SCHEME: &str = "postgresql://";

/// Raw environment as read by figment. Presence matters, not content.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvSettings {
    /// Hosted-environment marker (`RENDER`).
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub render: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub database_url: Option<String>,
}

/// figment parses `RENDER=true` as a boolean; keep it as text.
fn scalar_as_string<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Bool(bool),
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(Option::<Scalar>::deserialize(de)?.map(|s| match s {
        Scalar::Bool(b) => b.to_string(),
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Text(t) => t,
    }))
}

impl EnvSettings {
    pub fn from_figment(figment: &Figment) -> Result<Self, AppError> {
        Ok(figment.extract()?)
    }

    /// Reads `RENDER` and `DATABASE_URL` from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_figment(&Figment::from(Env::raw().only(&["RENDER", "DATABASE_URL"])))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbConfig {
    Local { path: PathBuf },
    Hosted { url: String },
}

impl DbConfig {
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self::Local { path: path.into() }
    }

    pub fn hosted(url: &str) -> Self {
        Self::Hosted {
            url: normalize_database_url(url),
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::resolve(EnvSettings::from_env()?)
    }

    /// Embedded store unless the marker or a connection string is present.
    pub fn resolve(settings: EnvSettings) -> Result<Self, AppError> {
        match (settings.render, settings.database_url) {
            (None, None) => Ok(Self::local(LOCAL_DB_FILE)),
            (_, Some(url)) => Ok(Self::hosted(&url)),
            (Some(_), None) => Err(AppError::Config(
                "DATABASE_URL must be set when RENDER is present".into(),
            )),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Local { .. } => "sqlite",
            Self::Hosted { .. } => "postgresql",
        }
    }
}

/// Rewrites a leading `postgres://` to `postgresql://`, once.
pub fn normalize_database_url(url: &str) -> String {
    match url.strip_prefix(LEGACY_SCHEME) {
        Some(rest) => format!("{}{}", MODERN_SCHEME, rest),
        None => url.to_string(),
    }
}
