use std::collections::HashSet;

use rusqlite::{params, Connection};

use crate::error::ProdiflowError;

/// Authoritative running point total. Awards are applied as deltas inside
/// the caller's transaction; the total is never recomputed from task counts.
pub fn total_points(conn: &Connection) -> Result<i64, ProdiflowError> {
    conn.query_row("SELECT total_points FROM profile WHERE id = 1", [], |row| {
        row.get(0)
    })
    .map_err(ProdiflowError::from)
}

pub fn add_points(conn: &Connection, delta: i64) -> Result<(), ProdiflowError> {
    conn.execute(
        "UPDATE profile SET total_points = total_points + ?1 WHERE id = 1",
        params![delta],
    )?;
    Ok(())
}

pub fn unlocked_ids(conn: &Connection) -> Result<HashSet<String>, ProdiflowError> {
    let mut stmt = conn.prepare("SELECT id FROM unlocked_achievements")?;
    let ids = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<HashSet<_>, _>>()?;
    Ok(ids)
}

pub fn record_unlocked(conn: &Connection, achievement_id: &str) -> Result<(), ProdiflowError> {
    conn.execute(
        "INSERT OR IGNORE INTO unlocked_achievements (id) VALUES (?1)",
        params![achievement_id],
    )?;
    Ok(())
}
