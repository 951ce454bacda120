use serde_json::json;

use crate::db::connection;

pub fn run(json_output: bool) -> i32 {
    let already = connection::db_path().map(|p| p.exists()).unwrap_or(false);
    match connection::init_db() {
        Ok(path) => {
            if json_output {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "success": true,
                        "data": {
                            "path": path.to_string_lossy(),
                            "created": !already
                        }
                    }))
                    .unwrap()
                );
            } else if already {
                println!("Already initialized; prodiflow store at {}", path.display());
            } else {
                println!("Initialized prodiflow at {}", path.display());
            }
            0
        }
        Err(e) => {
            if json_output {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&crate::output::json::error(&e)).unwrap()
                );
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}
