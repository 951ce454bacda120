use rusqlite::{params, Connection};

use crate::error::ProdiflowError;
use crate::models::Section;

use super::{subsection_repo, task_repo};

pub fn create_section(
    conn: &Connection,
    id: &str,
    title: &str,
    icon: &str,
) -> Result<Section, ProdiflowError> {
    conn.execute(
        "INSERT INTO sections (id, title, icon) VALUES (?1, ?2, ?3)",
        params![id, title, icon],
    )?;
    get_section(conn, id)
}

/// Load one section hydrated with its subsections and tasks.
pub fn get_section(conn: &Connection, id: &str) -> Result<Section, ProdiflowError> {
    let mut section = conn
        .query_row(
            "SELECT id, title, icon, created_at FROM sections WHERE id = ?1",
            params![id],
            row_to_section,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => ProdiflowError::section_not_found(id),
            _ => ProdiflowError::from(e),
        })?;
    hydrate(conn, &mut section)?;
    Ok(section)
}

/// Resolve a section by exact ID, exact title, or unique ID prefix.
pub fn resolve_section(conn: &Connection, reference: &str) -> Result<Section, ProdiflowError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, icon, created_at FROM sections
         WHERE id = ?1 OR title = ?1 OR id LIKE ?2",
    )?;
    let prefix = format!("{reference}%");
    let mut sections: Vec<Section> = stmt
        .query_map(params![reference, prefix], row_to_section)?
        .collect::<Result<Vec<_>, _>>()?;

    match sections.len() {
        0 => Err(ProdiflowError::section_not_found(reference)),
        1 => {
            let mut section = sections.remove(0);
            hydrate(conn, &mut section)?;
            Ok(section)
        }
        _ => {
            let candidates: Vec<String> = sections
                .iter()
                .map(|s| format!("{} ({})", s.title, s.id))
                .collect();
            Err(ProdiflowError::ambiguous_ref(reference, &candidates))
        }
    }
}

/// All sections hydrated, in creation order.
pub fn load_tree(conn: &Connection) -> Result<Vec<Section>, ProdiflowError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, icon, created_at FROM sections ORDER BY created_at ASC, id ASC",
    )?;
    let mut sections: Vec<Section> = stmt
        .query_map([], row_to_section)?
        .collect::<Result<Vec<_>, _>>()?;
    for section in &mut sections {
        hydrate(conn, section)?;
    }
    Ok(sections)
}

/// Deleting a section cascades to its subsections and tasks (enforced by
/// the schema's ON DELETE CASCADE).
pub fn delete_section(conn: &Connection, id: &str) -> Result<(), ProdiflowError> {
    let changed = conn.execute("DELETE FROM sections WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(ProdiflowError::section_not_found(id));
    }
    Ok(())
}

fn hydrate(conn: &Connection, section: &mut Section) -> Result<(), ProdiflowError> {
    section.subsections = subsection_repo::list_by_section(conn, &section.id)?;
    for sub in &mut section.subsections {
        sub.tasks = task_repo::list_tasks_by_subsection(conn, &sub.id)?;
    }
    section.tasks = task_repo::list_tasks_by_section(conn, &section.id)?;
    Ok(())
}

fn row_to_section(row: &rusqlite::Row) -> rusqlite::Result<Section> {
    Ok(Section {
        id: row.get(0)?,
        title: row.get(1)?,
        icon: row.get(2)?,
        created_at: row.get(3)?,
        subsections: Vec::new(),
        tasks: Vec::new(),
    })
}
