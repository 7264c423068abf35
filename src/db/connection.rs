use anyhow::{Context, Result};
use log::debug;
use rusqlite::Connection;

/// Open the session store: an in-memory SQLite database that disappears with
/// the process. The schema is created on every call since nothing is carried
/// over between runs.
pub fn open_session_store() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS employees (
            id INTEGER PRIMARY KEY,
            full_name TEXT NOT NULL,
            email TEXT NOT NULL,
            mobile TEXT NOT NULL,
            department TEXT NOT NULL
        )",
        [],
    )
    .context("failed to create employees table")?;

    debug!("session store ready");
    Ok(conn)
}
