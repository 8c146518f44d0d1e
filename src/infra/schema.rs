//! DDL for the seven voting tables and the seed data.

use super::db::Dialect;

pub const SEED_STATE: &str = "Andhra Pradesh";

pub const SEED_CONSTITUENCIES: &[&str] = &[
    "Araku",
    "Srikakulam",
    "Vizianagaram",
    "Visakhapatnam",
    "Anakapalli",
    "Kakinada",
    "Amalapuram",
    "Rajahmundry",
    "Narasapuram",
    "Eluru",
    "Machilipatnam",
    "Vijayawada",
    "Guntur",
    "Narasaraopet",
    "Bapatla",
    "Ongole",
    "Nandyal",
    "Kurnool",
    "Anantapur",
    "Hindupur",
    "Kadapa",
    "Nellore",
    "Tirupati",
    "Rajampet",
    "Chittoor",
];

// TODO: read the default admin password from configuration instead of shipping it in the binary.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

pub const TABLES: &[&str] = &[
    "constituencies",
    "voters",
    "admins",
    "candidates",
    "elections",
    "votes",
    "audit_logs",
];

/// `{id}` is replaced with the dialect's identity column.
const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS constituencies (
    id {id},
    name VARCHAR(255) UNIQUE NOT NULL,
    state VARCHAR(255) NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS voters (
    id {id},
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) UNIQUE NOT NULL,
    password VARCHAR(255) NOT NULL,
    constituency VARCHAR(255) NOT NULL,
    is_verified BOOLEAN DEFAULT FALSE,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS admins (
    id {id},
    username VARCHAR(255) UNIQUE NOT NULL,
    password VARCHAR(255) NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS candidates (
    id {id},
    name VARCHAR(255) NOT NULL,
    party VARCHAR(255) NOT NULL,
    constituency VARCHAR(255) NOT NULL,
    photo_path TEXT,
    symbol_path TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS elections (
    id {id},
    title VARCHAR(255) NOT NULL,
    description TEXT,
    constituency VARCHAR(255) NOT NULL,
    start_time TIMESTAMP NOT NULL,
    end_time TIMESTAMP NOT NULL,
    status VARCHAR(50) NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS votes (
    id {id},
    voter_id INTEGER NOT NULL,
    election_id INTEGER NOT NULL,
    candidate_id INTEGER NOT NULL,
    voted_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (voter_id, election_id),
    FOREIGN KEY (voter_id) REFERENCES voters (id),
    FOREIGN KEY (election_id) REFERENCES elections (id),
    FOREIGN KEY (candidate_id) REFERENCES candidates (id)
);

CREATE TABLE IF NOT EXISTS audit_logs (
    id {id},
    action VARCHAR(255) NOT NULL,
    user_type VARCHAR(50) NOT NULL,
    user_id INTEGER NOT NULL,
    ip_address VARCHAR(45),
    user_agent TEXT,
    details TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)
"#;

fn identity_column(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Sqlite => "INTEGER PRIMARY KEY AUTOINCREMENT",
        Dialect::Postgres => "SERIAL PRIMARY KEY",
    }
}

pub fn create_tables_sql(dialect: Dialect) -> String {
    CREATE_TABLES.replace("{id}", identity_column(dialect))
}
