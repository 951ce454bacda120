use chrono::{Local, NaiveDate};
use serde_json::json;

use crate::db::{connection, snapshot, task_repo};
use crate::engine::calendar;
use crate::error::ProdiflowError;
use crate::output;

pub fn run_stats(json_output: bool) -> i32 {
    wrap(json_output, || {
        let conn = connection::open_db()?;
        let today = Local::now().date_naive();
        let stats = snapshot::build_snapshot(&conn, today)?;
        let tasks = task_repo::list_all_tasks(&conn)?;
        let week = calendar::weekly_stats(&tasks, today)?;

        if json_output {
            println!(
                "{}",
                serde_json::to_string_pretty(&output::json::success(json!({
                    "stats": output::json::stats_json(&stats),
                    "weekly": output::json::week_json(&week)
                })))
                .unwrap()
            );
        } else {
            output::text::print_stats(&stats);
            println!();
            output::text::print_week(&week);
        }
        Ok(0)
    })
}

pub fn run_calendar(year: i32, month: u32, json_output: bool) -> i32 {
    wrap(json_output, || {
        let conn = connection::open_db()?;
        let tasks = task_repo::list_all_tasks(&conn)?;
        let days = calendar::calendar_stats(&tasks, year, month)?;

        if json_output {
            println!(
                "{}",
                serde_json::to_string_pretty(&output::json::success(json!({
                    "year": year,
                    "month": month,
                    "days": output::json::calendar_json(&days)
                })))
                .unwrap()
            );
        } else {
            output::text::print_calendar(year, month, &days);
        }
        Ok(0)
    })
}

pub fn run_day(date: &str, json_output: bool) -> i32 {
    let date = date.to_string();
    wrap(json_output, move || {
        let day = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| {
            ProdiflowError::validation(format!("Invalid date '{date}', expected YYYY-MM-DD"))
        })?;
        let conn = connection::open_db()?;
        let tasks = task_repo::list_tasks_on_date(&conn, day)?;
        let completed = tasks.iter().filter(|t| t.is_completed()).count();

        if json_output {
            let tasks_json: Vec<_> = tasks.iter().map(output::json::task_json).collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&output::json::success(json!({
                    "date": day.format("%Y-%m-%d").to_string(),
                    "stats": { "t": tasks.len(), "c": completed },
                    "tasks": tasks_json
                })))
                .unwrap()
            );
        } else {
            println!("Tasks on {day} ({completed}/{} completed):", tasks.len());
            output::text::print_task_list(&tasks);
        }
        Ok(0)
    })
}

fn wrap<F>(json_output: bool, f: F) -> i32
where
    F: FnOnce() -> Result<i32, ProdiflowError>,
{
    match f() {
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
