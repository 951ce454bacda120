use chrono::NaiveDate;
use rusqlite::{params, Connection};

use crate::error::ProdiflowError;
use crate::models::{Priority, Task, TaskKind, TaskStatus};

const TASK_COLUMNS: &str = "id, section_id, subsection_id, title, kind, scheduled_on,
                priority, tags, status, created_at, completed_at";

#[allow(clippy::too_many_arguments)]
pub fn create_task(
    conn: &Connection,
    id: &str,
    section_id: &str,
    subsection_id: Option<&str>,
    title: &str,
    kind: TaskKind,
    scheduled_on: NaiveDate,
    priority: Priority,
    tags: &[String],
) -> Result<Task, ProdiflowError> {
    let tags_json = serde_json::to_string(tags)
        .map_err(|e| ProdiflowError::database(e.to_string()))?;
    conn.execute(
        "INSERT INTO tasks (id, section_id, subsection_id, title, kind, scheduled_on, priority, tags)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            id,
            section_id,
            subsection_id,
            title,
            kind.as_str(),
            scheduled_on.format("%Y-%m-%d").to_string(),
            priority.as_str(),
            tags_json
        ],
    )?;
    get_task_by_id(conn, id)
}

pub fn get_task_by_id(conn: &Connection, id: &str) -> Result<Task, ProdiflowError> {
    conn.query_row(
        &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
        params![id],
        row_to_task,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => ProdiflowError::task_not_found(id),
        _ => ProdiflowError::from(e),
    })
}

/// Resolve a task by exact ID or unique ID prefix.
pub fn resolve_task(conn: &Connection, reference: &str) -> Result<Task, ProdiflowError> {
    if let Ok(task) = get_task_by_id(conn, reference) {
        return Ok(task);
    }

    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE id LIKE ?1"
    ))?;
    let prefix = format!("{reference}%");
    let tasks: Vec<Task> = stmt
        .query_map(params![prefix], row_to_task)?
        .collect::<Result<Vec<_>, _>>()?;

    match tasks.len() {
        0 => Err(ProdiflowError::task_not_found(reference)),
        1 => Ok(tasks.into_iter().next().unwrap()),
        _ => {
            let candidates: Vec<String> =
                tasks.iter().map(|t| format!("{} ({})", t.title, t.id)).collect();
            Err(ProdiflowError::ambiguous_ref(reference, &candidates))
        }
    }
}

pub fn list_all_tasks(conn: &Connection) -> Result<Vec<Task>, ProdiflowError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at ASC, id ASC"
    ))?;
    let tasks = stmt
        .query_map([], row_to_task)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tasks)
}

pub fn list_tasks_by_section(conn: &Connection, section_id: &str) -> Result<Vec<Task>, ProdiflowError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks
         WHERE section_id = ?1 AND subsection_id IS NULL
         ORDER BY created_at ASC, id ASC"
    ))?;
    let tasks = stmt
        .query_map(params![section_id], row_to_task)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tasks)
}

pub fn list_tasks_by_subsection(
    conn: &Connection,
    subsection_id: &str,
) -> Result<Vec<Task>, ProdiflowError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE subsection_id = ?1
         ORDER BY created_at ASC, id ASC"
    ))?;
    let tasks = stmt
        .query_map(params![subsection_id], row_to_task)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tasks)
}

pub fn list_tasks_on_date(conn: &Connection, date: NaiveDate) -> Result<Vec<Task>, ProdiflowError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE scheduled_on = ?1
         ORDER BY created_at ASC, id ASC"
    ))?;
    let tasks = stmt
        .query_map(params![date.format("%Y-%m-%d").to_string()], row_to_task)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tasks)
}

/// One-way pending -> completed transition; completed_at is set exactly
/// once, in local time so streaks align with the owner's calendar day.
pub fn complete_task(conn: &Connection, id: &str) -> Result<(), ProdiflowError> {
    let changed = conn.execute(
        "UPDATE tasks SET status = 'completed',
                completed_at = datetime('now', 'localtime')
         WHERE id = ?1 AND status = 'pending'",
        params![id],
    )?;
    if changed == 0 {
        return Err(ProdiflowError::already_completed(id));
    }
    Ok(())
}

pub fn delete_task(conn: &Connection, id: &str) -> Result<(), ProdiflowError> {
    let changed = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(ProdiflowError::task_not_found(id));
    }
    Ok(())
}

pub fn has_direct_tasks(conn: &Connection, section_id: &str) -> Result<bool, ProdiflowError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM tasks WHERE section_id = ?1 AND subsection_id IS NULL",
        params![section_id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// (completed, total) over the whole task universe.
pub fn task_counts(conn: &Connection) -> Result<(i64, i64), ProdiflowError> {
    conn.query_row(
        "SELECT COALESCE(SUM(CASE WHEN status = 'completed' THEN 1 ELSE 0 END), 0), COUNT(*)
         FROM tasks",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .map_err(ProdiflowError::from)
}

/// Distinct local calendar days with at least one completion.
pub fn completion_dates(conn: &Connection) -> Result<Vec<NaiveDate>, ProdiflowError> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT substr(completed_at, 1, 10) FROM tasks
         WHERE status = 'completed' AND completed_at IS NOT NULL",
    )?;
    let days = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(days
        .iter()
        .filter_map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .collect())
}

fn row_to_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    let tags_json: String = row.get(7)?;
    Ok(Task {
        id: row.get(0)?,
        section_id: row.get(1)?,
        subsection_id: row.get(2)?,
        title: row.get(3)?,
        kind: TaskKind::from_str(&row.get::<_, String>(4)?).unwrap_or(TaskKind::Daily),
        scheduled_on: NaiveDate::parse_from_str(&row.get::<_, String>(5)?, "%Y-%m-%d").ok(),
        priority: Priority::from_str(&row.get::<_, String>(6)?).unwrap_or(Priority::Medium),
        tags: serde_json::from_str(&tags_json).unwrap_or_default(),
        status: TaskStatus::from_str(&row.get::<_, String>(8)?).unwrap_or(TaskStatus::Pending),
        created_at: row.get(9)?,
        completed_at: row.get(10)?,
    })
}
