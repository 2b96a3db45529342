use anyhow::{Error, Result};
use rusqlite::Connection as SyncConnection;
use tokio_rusqlite::Connection;

/// Open (or create) the catalog database at `path`.
pub async fn async_db(path: &str) -> Result<Connection, Error> {
    let db = Connection::open(path).await?;
    Ok(db)
}

/// Create the tables the assistant reads from. Safe to run more than
/// once.
pub fn initialize_db(conn: &SyncConnection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        r#"
        BEGIN;
        CREATE TABLE IF NOT EXISTS product (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            price REAL NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );
        COMMIT;
        "#,
    )
}
