use std::env;
use std::fs;
use std::path::PathBuf;

use rusqlite::Connection;

use crate::error::{ErrorCode, ProdiflowError};

use super::migrations;

/// Find the .git root by walking up from the current directory.
pub fn find_git_root() -> Result<PathBuf, ProdiflowError> {
    let mut dir = env::current_dir().map_err(|e| ProdiflowError::database(e.to_string()))?;
    loop {
        if dir.join(".git").exists() {
            return Ok(dir);
        }
        if !dir.pop() {
            return Err(ProdiflowError::new(
                ErrorCode::NotInitialized,
                "Not inside a git repository. prodiflow requires a git repository.",
            ));
        }
    }
}

/// Path to the prodiflow database.
pub fn db_path() -> Result<PathBuf, ProdiflowError> {
    let root = find_git_root()?;
    Ok(root.join(".prodiflow").join("prodiflow.db"))
}

/// Open a connection to the database. Returns error if not initialized.
pub fn open_db() -> Result<Connection, ProdiflowError> {
    let path = db_path()?;
    if !path.exists() {
        return Err(ProdiflowError::not_initialized());
    }
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    Ok(conn)
}

/// Initialize the database: create directories, database, and run migrations.
pub fn init_db() -> Result<PathBuf, ProdiflowError> {
    let path = db_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ProdiflowError::database(e.to_string()))?;
    }
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(path)
}

fn configure_connection(conn: &Connection) -> Result<(), ProdiflowError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}
