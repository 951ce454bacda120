use chrono::{Local, NaiveDate};
use serde_json::json;

use crate::cli::commands::TaskCommands;
use crate::db::{connection, profile_repo, section_repo, snapshot, subsection_repo, task_repo};
use crate::engine::{achievements, streak};
use crate::error::ProdiflowError;
use crate::models::{Priority, TaskKind};
use crate::output;

pub fn run(cmd: TaskCommands, json_output: bool) -> i32 {
    let result = match cmd {
        TaskCommands::Add {
            title,
            section,
            sub,
            kind,
            due,
            priority,
            tag,
        } => run_add(
            &title,
            &section,
            sub.as_deref(),
            &kind,
            due.as_deref(),
            &priority,
            &tag,
            json_output,
        ),
        TaskCommands::List => run_list(json_output),
        TaskCommands::Show { id } => run_show(&id, json_output),
        TaskCommands::Complete { id } => run_complete(&id, json_output),
        TaskCommands::Delete { id } => run_delete(&id, json_output),
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

fn parse_date(s: &str) -> Result<NaiveDate, ProdiflowError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| ProdiflowError::validation(format!("Invalid date '{s}', expected YYYY-MM-DD")))
}

#[allow(clippy::too_many_arguments)]
fn run_add(
    title: &str,
    section_ref: &str,
    sub_ref: Option<&str>,
    kind: &str,
    due: Option<&str>,
    priority: &str,
    tags: &[String],
    json_output: bool,
) -> Result<i32, ProdiflowError> {
    if title.trim().is_empty() {
        return Err(ProdiflowError::validation("Task title must not be empty"));
    }
    let kind = TaskKind::from_str(kind)
        .ok_or_else(|| ProdiflowError::validation("Kind must be 'daily' or 'deadline'"))?;
    let priority = Priority::from_str(priority)
        .ok_or_else(|| ProdiflowError::validation("Priority must be 'low', 'medium', or 'high'"))?;

    let scheduled_on = match (kind, due) {
        (TaskKind::Deadline, None) => {
            return Err(ProdiflowError::validation(
                "Deadline tasks require --due YYYY-MM-DD",
            ))
        }
        (_, Some(date)) => parse_date(date)?,
        // Daily task defaults to its creation date.
        (TaskKind::Daily, None) => Local::now().date_naive(),
    };

    let conn = connection::open_db()?;
    let section = section_repo::resolve_section(&conn, section_ref)?;

    // Containers are mutually exclusive: a section with subsections takes
    // tasks only through them.
    let subsection_id = match sub_ref {
        Some(sub_ref) => {
            Some(subsection_repo::resolve_subsection(&conn, &section.id, sub_ref)?.id)
        }
        None => {
            if subsection_repo::section_has_subsections(&conn, &section.id)? {
                return Err(ProdiflowError::validation(format!(
                    "Section '{}' holds subsections; use --sub to pick one",
                    section.title
                )));
            }
            None
        }
    };

    let task_id = ulid::Ulid::new().to_string();
    let task = task_repo::create_task(
        &conn,
        &task_id,
        &section.id,
        subsection_id.as_deref(),
        title,
        kind,
        scheduled_on,
        priority,
        tags,
    )?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "task": output::json::task_json(&task)
            })))
            .unwrap()
        );
    } else {
        println!("Added task: {} ({})", task.title, task.id);
    }
    Ok(0)
}

fn run_list(json_output: bool) -> Result<i32, ProdiflowError> {
    let conn = connection::open_db()?;
    let tasks = task_repo::list_all_tasks(&conn)?;

    if json_output {
        let tasks_json: Vec<_> = tasks.iter().map(output::json::task_json).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "tasks": tasks_json
            })))
            .unwrap()
        );
    } else {
        output::text::print_task_list(&tasks);
    }
    Ok(0)
}

fn run_show(id: &str, json_output: bool) -> Result<i32, ProdiflowError> {
    let conn = connection::open_db()?;
    let task = task_repo::resolve_task(&conn, id)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "task": output::json::task_json(&task)
            })))
            .unwrap()
        );
    } else {
        output::text::print_task(&task);
    }
    Ok(0)
}

/// The completion event: one-way status transition, fixed point award,
/// snapshot rebuild, achievement evaluation. All inside one transaction so
/// stats are re-derived from a serialized store.
fn run_complete(id: &str, json_output: bool) -> Result<i32, ProdiflowError> {
    let conn = connection::open_db()?;
    let task = task_repo::resolve_task(&conn, id)?;
    if task.is_completed() {
        return Err(ProdiflowError::already_completed(&task.id));
    }
    let today = Local::now().date_naive();

    conn.execute_batch("BEGIN IMMEDIATE")?;
    let result = (|| -> Result<_, ProdiflowError> {
        task_repo::complete_task(&conn, &task.id)?;
        profile_repo::add_points(&conn, streak::POINTS_PER_COMPLETION)?;

        let interim = snapshot::build_snapshot(&conn, today)?;
        let unlocked = profile_repo::unlocked_ids(&conn)?;
        let catalog = achievements::default_catalog();
        let newly = achievements::evaluate(&interim, &unlocked, &catalog);

        let mut points_awarded = streak::POINTS_PER_COMPLETION;
        for rule in &newly {
            profile_repo::record_unlocked(&conn, rule.id)?;
            profile_repo::add_points(&conn, rule.point_reward)?;
            points_awarded += rule.point_reward;
        }

        let final_snapshot = snapshot::build_snapshot(&conn, today)?;
        Ok((newly, points_awarded, final_snapshot))
    })();

    match result {
        Ok((newly, points_awarded, stats)) => {
            conn.execute_batch("COMMIT")?;
            let completed = task_repo::get_task_by_id(&conn, &task.id)?;

            if json_output {
                let mut data = json!({
                    "completed_task": output::json::task_json(&completed),
                    "points_awarded": points_awarded,
                    "stats": output::json::stats_json(&stats)
                });
                if !newly.is_empty() {
                    data["new_achievements"] = json!(newly
                        .iter()
                        .map(|r| json!({
                            "id": r.id,
                            "title": r.title,
                            "icon": r.icon,
                            "point_reward": r.point_reward
                        }))
                        .collect::<Vec<_>>());
                }
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output::json::success(data)).unwrap()
                );
            } else {
                println!("Completed: {} (+{} points)", completed.title, points_awarded);
                for rule in &newly {
                    println!(
                        "Achievement unlocked: {} {} (+{} points)",
                        rule.icon, rule.title, rule.point_reward
                    );
                }
                output::text::print_stats(&stats);
            }
            Ok(0)
        }
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK");
            Err(e)
        }
    }
}

fn run_delete(id: &str, json_output: bool) -> Result<i32, ProdiflowError> {
    let conn = connection::open_db()?;
    let task = task_repo::resolve_task(&conn, id)?;
    task_repo::delete_task(&conn, &task.id)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "deleted": { "id": task.id, "title": task.title }
            })))
            .unwrap()
        );
    } else {
        println!("Deleted task: {} ({})", task.title, task.id);
    }
    Ok(0)
}
