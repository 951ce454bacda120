use serde_json::json;

use crate::cli::commands::SubCommands;
use crate::db::{connection, section_repo, subsection_repo, task_repo};
use crate::error::ProdiflowError;
use crate::output;

pub fn run(cmd: SubCommands, json_output: bool) -> i32 {
    let result = match cmd {
        SubCommands::Add { section, title } => run_add(&section, &title, json_output),
        SubCommands::Delete { section, reference } => run_delete(&section, &reference, json_output),
    };
    match result {
        Ok(code) => code,
        Err(e) => {
            if json_output {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output::json::error(&e)).unwrap()
                );
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}

fn run_add(section_ref: &str, title: &str, json_output: bool) -> Result<i32, ProdiflowError> {
    if title.trim().is_empty() {
        return Err(ProdiflowError::validation("Subsection title must not be empty"));
    }
    let conn = connection::open_db()?;
    let section = section_repo::resolve_section(&conn, section_ref)?;

    // Containers are mutually exclusive: direct tasks XOR subsections.
    if task_repo::has_direct_tasks(&conn, &section.id)? {
        return Err(ProdiflowError::validation(format!(
            "Section '{}' holds direct tasks; it cannot also hold subsections",
            section.title
        )));
    }

    let id = ulid::Ulid::new().to_string();
    let sub = subsection_repo::create_subsection(&conn, &id, &section.id, title)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "subsection": output::json::subsection_json(&sub)
            })))
            .unwrap()
        );
    } else {
        println!("Created subsection: {} ({})", sub.title, sub.id);
    }
    Ok(0)
}

fn run_delete(section_ref: &str, reference: &str, json_output: bool) -> Result<i32, ProdiflowError> {
    let conn = connection::open_db()?;
    let section = section_repo::resolve_section(&conn, section_ref)?;
    let sub = subsection_repo::resolve_subsection(&conn, &section.id, reference)?;
    subsection_repo::delete_subsection(&conn, &sub.id)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "deleted": { "id": sub.id, "title": sub.title }
            })))
            .unwrap()
        );
    } else {
        println!("Deleted subsection: {} ({})", sub.title, sub.id);
    }
    Ok(0)
}
