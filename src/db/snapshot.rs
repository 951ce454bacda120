use chrono::NaiveDate;
use rusqlite::Connection;

use crate::engine::streak;
use crate::error::ProdiflowError;
use crate::models::StatsSnapshot;

use super::{profile_repo, task_repo};

/// Assemble a fresh stats snapshot from the store. Always recomputed from
/// the latest task universe so derived values never drift.
pub fn build_snapshot(conn: &Connection, today: NaiveDate) -> Result<StatsSnapshot, ProdiflowError> {
    let (tasks_completed, total_tasks) = task_repo::task_counts(conn)?;
    let dates = task_repo::completion_dates(conn)?;
    Ok(StatsSnapshot {
        total_points: profile_repo::total_points(conn)?,
        current_streak: streak::current_streak(&dates, today),
        tasks_completed,
        total_tasks,
    })
}
