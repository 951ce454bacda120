use chrono::Local;
use serde_json::json;

use crate::db::{connection, profile_repo, snapshot};
use crate::engine::achievements;
use crate::error::ProdiflowError;
use crate::output;

pub fn run(json_output: bool) -> i32 {
    let result = run_inner(json_output);
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

fn run_inner(json_output: bool) -> Result<i32, ProdiflowError> {
    let conn = connection::open_db()?;
    let today = Local::now().date_naive();
    let stats = snapshot::build_snapshot(&conn, today)?;
    let unlocked = profile_repo::unlocked_ids(&conn)?;
    let catalog = achievements::default_catalog();

    if json_output {
        let achievements_json: Vec<_> = catalog
            .iter()
            .map(|r| output::json::achievement_json(r, &unlocked))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "stats": output::json::stats_json(&stats),
                "achievements": achievements_json
            })))
            .unwrap()
        );
    } else {
        output::text::print_stats(&stats);
        println!("\nAchievements:");
        output::text::print_achievements(&catalog, &unlocked);
    }
    Ok(0)
}
