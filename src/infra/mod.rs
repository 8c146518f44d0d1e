//! Infrastructure: connection factory, backends, schema.

pub mod db;
pub mod postgres;
pub mod schema;
pub mod sqlite;

pub use db::{
    get_constituencies, init_db, init_schema, open, with_transaction, DbConnection, DbValue,
    Dialect, InitReport, Row,
};
pub use postgres::PgConnection;
pub use sqlite::SqliteConnection;
