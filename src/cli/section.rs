use serde_json::json;

use crate::cli::commands::SectionCommands;
use crate::db::{connection, section_repo};
use crate::error::ProdiflowError;
use crate::output;

pub fn run(cmd: SectionCommands, json_output: bool) -> i32 {
    let result = match cmd {
        SectionCommands::Add { title, icon } => run_add(&title, &icon, json_output),
        SectionCommands::List => run_list(json_output),
        SectionCommands::Show { reference } => run_show(&reference, json_output),
        SectionCommands::Delete { reference } => run_delete(&reference, json_output),
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

fn run_add(title: &str, icon: &str, json_output: bool) -> Result<i32, ProdiflowError> {
    if title.trim().is_empty() {
        return Err(ProdiflowError::validation("Section title must not be empty"));
    }
    let conn = connection::open_db()?;
    let id = ulid::Ulid::new().to_string();
    let section = section_repo::create_section(&conn, &id, title, icon)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "section": output::json::section_json(&section)
            })))
            .unwrap()
        );
    } else {
        println!("Created section: {} ({})", section.title, section.id);
    }
    Ok(0)
}

fn run_list(json_output: bool) -> Result<i32, ProdiflowError> {
    let conn = connection::open_db()?;
    let sections = section_repo::load_tree(&conn)?;

    if json_output {
        let sections_json: Vec<_> = sections.iter().map(output::json::section_json).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "sections": sections_json
            })))
            .unwrap()
        );
    } else {
        output::text::print_section_list(&sections);
    }
    Ok(0)
}

fn run_show(reference: &str, json_output: bool) -> Result<i32, ProdiflowError> {
    let conn = connection::open_db()?;
    let section = section_repo::resolve_section(&conn, reference)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "section": output::json::section_json(&section)
            })))
            .unwrap()
        );
    } else {
        output::text::print_section(&section);
    }
    Ok(0)
}

fn run_delete(reference: &str, json_output: bool) -> Result<i32, ProdiflowError> {
    let conn = connection::open_db()?;
    let section = section_repo::resolve_section(&conn, reference)?;
    section_repo::delete_section(&conn, &section.id)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "deleted": { "id": section.id, "title": section.title }
            })))
            .unwrap()
        );
    } else {
        println!("Deleted section: {} ({})", section.title, section.id);
    }
    Ok(0)
}
