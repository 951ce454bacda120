use rusqlite::{params, Connection};

use crate::error::ProdiflowError;
use crate::models::Subsection;

pub fn create_subsection(
    conn: &Connection,
    id: &str,
    section_id: &str,
    title: &str,
) -> Result<Subsection, ProdiflowError> {
    conn.execute(
        "INSERT INTO subsections (id, section_id, title) VALUES (?1, ?2, ?3)",
        params![id, section_id, title],
    )?;
    get_subsection(conn, id)
}

pub fn get_subsection(conn: &Connection, id: &str) -> Result<Subsection, ProdiflowError> {
    conn.query_row(
        "SELECT id, section_id, title, created_at FROM subsections WHERE id = ?1",
        params![id],
        row_to_subsection,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => ProdiflowError::subsection_not_found(id),
        _ => ProdiflowError::from(e),
    })
}

/// Resolve a subsection within a section by exact ID, exact title, or
/// unique ID prefix.
pub fn resolve_subsection(
    conn: &Connection,
    section_id: &str,
    reference: &str,
) -> Result<Subsection, ProdiflowError> {
    let mut stmt = conn.prepare(
        "SELECT id, section_id, title, created_at FROM subsections
         WHERE section_id = ?1 AND (id = ?2 OR title = ?2 OR id LIKE ?3)",
    )?;
    let prefix = format!("{reference}%");
    let subs: Vec<Subsection> = stmt
        .query_map(params![section_id, reference, prefix], row_to_subsection)?
        .collect::<Result<Vec<_>, _>>()?;

    match subs.len() {
        0 => Err(ProdiflowError::subsection_not_found(reference)),
        1 => Ok(subs.into_iter().next().unwrap()),
        _ => {
            let candidates: Vec<String> =
                subs.iter().map(|s| format!("{} ({})", s.title, s.id)).collect();
            Err(ProdiflowError::ambiguous_ref(reference, &candidates))
        }
    }
}

/// Subsections of a section in creation order, without tasks hydrated.
pub fn list_by_section(conn: &Connection, section_id: &str) -> Result<Vec<Subsection>, ProdiflowError> {
    let mut stmt = conn.prepare(
        "SELECT id, section_id, title, created_at FROM subsections
         WHERE section_id = ?1 ORDER BY created_at ASC, id ASC",
    )?;
    let subs = stmt
        .query_map(params![section_id], row_to_subsection)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(subs)
}

pub fn section_has_subsections(conn: &Connection, section_id: &str) -> Result<bool, ProdiflowError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM subsections WHERE section_id = ?1",
        params![section_id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Deleting a subsection cascades to its tasks.
pub fn delete_subsection(conn: &Connection, id: &str) -> Result<(), ProdiflowError> {
    let changed = conn.execute("DELETE FROM subsections WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(ProdiflowError::subsection_not_found(id));
    }
    Ok(())
}

fn row_to_subsection(row: &rusqlite::Row) -> rusqlite::Result<Subsection> {
    Ok(Subsection {
        id: row.get(0)?,
        section_id: row.get(1)?,
        title: row.get(2)?,
        created_at: row.get(3)?,
        tasks: Vec::new(),
    })
}
