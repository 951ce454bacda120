#[allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

// ─── helpers ───────────────────────────────────────────────────────

struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        let dir = TempDir::new().expect("create tempdir");
        std::process::Command::new("git")
            .args(["init"])
            .current_dir(dir.path())
            .output()
            .expect("git init");
        Self { dir }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("prodiflow").expect("binary");
        cmd.current_dir(self.dir.path());
        cmd
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let mut a: Vec<&str> = args.to_vec();
        a.push("--json");
        let output = self.cmd().args(&a).output().expect("run");
        let stdout = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&stdout)
            .unwrap_or_else(|e| panic!("parse JSON failed: {e}\nstdout: {stdout}"))
    }

    fn run_ok(&self, args: &[&str]) -> Value {
        let v = self.run_json(args);
        assert_eq!(v["success"], true, "expected success=true: {v}");
        v
    }

    fn run_err(&self, args: &[&str]) -> Value {
        let v = self.run_json(args);
        assert_eq!(v["success"], false, "expected success=false: {v}");
        v
    }

    fn add_section(&self, title: &str) -> String {
        let v = self.run_ok(&["section", "add", title]);
        v["data"]["section"]["id"].as_str().unwrap().to_string()
    }

    fn add_sub(&self, section: &str, title: &str) -> String {
        let v = self.run_ok(&["sub", "add", section, title]);
        v["data"]["subsection"]["id"].as_str().unwrap().to_string()
    }

    fn add_task(&self, args: &[&str]) -> String {
        let mut a = vec!["task", "add"];
        a.extend_from_slice(args);
        let v = self.run_ok(&a);
        v["data"]["task"]["id"].as_str().unwrap().to_string()
    }
}

fn setup() -> TestEnv {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    env
}

// ─── 1. init ───────────────────────────────────────────────────────

#[test]
fn test_init() {
    let env = TestEnv::new();
    let v = env.run_ok(&["init"]);
    let path = v["data"]["path"].as_str().unwrap();
    assert!(path.ends_with(".prodiflow/prodiflow.db"));
    assert!(PathBuf::from(path).exists());
}

#[test]
fn test_init_idempotent() {
    let env = TestEnv::new();
    let v = env.run_ok(&["init"]);
    assert_eq!(v["data"]["created"], true);
    let v = env.run_ok(&["init"]);
    assert_eq!(v["data"]["created"], false);
    assert!(v["data"]["path"].as_str().unwrap().contains("prodiflow.db"));
}

#[test]
fn test_init_required_before_commands() {
    let env = TestEnv::new();
    let v = env.run_err(&["section", "list"]);
    assert_eq!(v["error"]["code"], "NOT_INITIALIZED");
}

// ─── 2. section crud ───────────────────────────────────────────────

#[test]
fn test_section_crud() {
    let env = setup();

    let v = env.run_ok(&["section", "add", "DSA Practice", "--icon", "🧮"]);
    let id = v["data"]["section"]["id"].as_str().unwrap().to_string();
    assert_eq!(v["data"]["section"]["title"], "DSA Practice");
    assert_eq!(v["data"]["section"]["icon"], "🧮");
    assert_eq!(v["data"]["section"]["completion_percent"], 0);

    let v = env.run_ok(&["section", "list"]);
    let sections = v["data"]["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0]["title"], "DSA Practice");

    // Resolve by title, by ID, and by ID prefix.
    let v = env.run_ok(&["section", "show", "DSA Practice"]);
    assert_eq!(v["data"]["section"]["id"], id.as_str());
    let v = env.run_ok(&["section", "show", &id[..10]]);
    assert_eq!(v["data"]["section"]["id"], id.as_str());

    let v = env.run_ok(&["section", "delete", "DSA Practice"]);
    assert_eq!(v["data"]["deleted"]["title"], "DSA Practice");

    let v = env.run_ok(&["section", "list"]);
    assert_eq!(v["data"]["sections"].as_array().unwrap().len(), 0);
}

#[test]
fn test_section_not_found() {
    let env = setup();
    let v = env.run_err(&["section", "show", "nope"]);
    assert_eq!(v["error"]["code"], "SECTION_NOT_FOUND");
}

#[test]
fn test_section_duplicate_title_is_ambiguous() {
    let env = setup();
    env.add_section("dup");
    env.add_section("dup");
    let v = env.run_err(&["section", "show", "dup"]);
    assert_eq!(v["error"]["code"], "AMBIGUOUS_REF");
}

#[test]
fn test_section_empty_title_rejected() {
    let env = setup();
    let v = env.run_err(&["section", "add", "  "]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

// ─── 3. container exclusivity ──────────────────────────────────────

#[test]
fn test_sub_add_rejected_when_section_has_direct_tasks() {
    let env = setup();
    env.add_section("work");
    env.add_task(&["Direct task", "--section", "work"]);
    let v = env.run_err(&["sub", "add", "work", "Planning"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_task_add_requires_sub_when_section_has_subsections() {
    let env = setup();
    env.add_section("study");
    env.add_sub("study", "Arrays");
    let v = env.run_err(&["task", "add", "Two sum", "--section", "study"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");

    let v = env.run_ok(&["task", "add", "Two sum", "--section", "study", "--sub", "Arrays"]);
    assert_eq!(v["data"]["task"]["status"], "pending");
}

// ─── 4. task add validation ────────────────────────────────────────

#[test]
fn test_task_add_defaults() {
    let env = setup();
    env.add_section("inbox");
    let v = env.run_ok(&["task", "add", "Water plants", "--section", "inbox"]);
    let task = &v["data"]["task"];
    assert_eq!(task["kind"], "daily");
    assert_eq!(task["priority"], "medium");
    assert_eq!(task["status"], "pending");
    // Daily without --due defaults to the creation date.
    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    assert_eq!(task["scheduled_on"], today.as_str());
}

#[test]
fn test_task_add_deadline_requires_due() {
    let env = setup();
    env.add_section("inbox");
    let v = env.run_err(&["task", "add", "Report", "--section", "inbox", "--kind", "deadline"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");

    let v = env.run_ok(&[
        "task", "add", "Report", "--section", "inbox", "--kind", "deadline", "--due", "2030-04-10",
    ]);
    assert_eq!(v["data"]["task"]["scheduled_on"], "2030-04-10");
}

#[test]
fn test_task_add_rejects_bad_inputs() {
    let env = setup();
    env.add_section("inbox");
    let v = env.run_err(&["task", "add", "X", "--section", "inbox", "--kind", "weekly"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    let v = env.run_err(&["task", "add", "X", "--section", "inbox", "--priority", "urgent"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    let v = env.run_err(&["task", "add", "X", "--section", "inbox", "--due", "04/10/2030"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_task_tags() {
    let env = setup();
    env.add_section("inbox");
    let v = env.run_ok(&[
        "task", "add", "Two sum", "--section", "inbox", "--tag", "leetcode", "--tag", "easy",
    ]);
    let tags = v["data"]["task"]["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0], "leetcode");
}

#[test]
fn test_task_resolve_by_prefix() {
    let env = setup();
    env.add_section("inbox");
    let id = env.add_task(&["Water plants", "--section", "inbox"]);
    let v = env.run_ok(&["task", "show", &id[..10]]);
    assert_eq!(v["data"]["task"]["id"], id.as_str());
}

// ─── 5. completion, points, achievements ───────────────────────────

#[test]
fn test_complete_awards_points_and_first_achievement() {
    let env = setup();
    env.add_section("inbox");
    let id = env.add_task(&["Water plants", "--section", "inbox"]);

    let v = env.run_ok(&["task", "complete", &id]);
    assert_eq!(v["data"]["completed_task"]["status"], "completed");
    assert!(v["data"]["completed_task"]["completed_at"].is_string());
    // 50 for the completion + 50 for "First Steps".
    assert_eq!(v["data"]["points_awarded"], 100);
    assert_eq!(v["data"]["stats"]["points"], 100);
    assert_eq!(v["data"]["stats"]["streak"], 1);
    assert_eq!(v["data"]["stats"]["tasks_completed"], 1);

    let achievements = v["data"]["new_achievements"].as_array().unwrap();
    assert_eq!(achievements.len(), 1);
    assert_eq!(achievements[0]["id"], "first-steps");
}

#[test]
fn test_complete_is_one_way() {
    let env = setup();
    env.add_section("inbox");
    let id = env.add_task(&["Water plants", "--section", "inbox"]);
    env.run_ok(&["task", "complete", &id]);

    let v = env.run_err(&["task", "complete", &id]);
    assert_eq!(v["error"]["code"], "ALREADY_COMPLETED");
}

#[test]
fn test_achievement_not_awarded_twice() {
    let env = setup();
    env.add_section("inbox");
    let a = env.add_task(&["One", "--section", "inbox"]);
    let b = env.add_task(&["Two", "--section", "inbox"]);

    env.run_ok(&["task", "complete", &a]);
    let v = env.run_ok(&["task", "complete", &b]);
    // Second completion: plain 50, no first-steps re-award.
    assert_eq!(v["data"]["points_awarded"], 50);
    assert_eq!(v["data"]["stats"]["points"], 150);
    assert!(v["data"].get("new_achievements").is_none());
}

// ─── 6. completion percentages ─────────────────────────────────────

#[test]
fn test_section_percent_weighted_aggregate() {
    // "Arrays" 1/2 completed, "Trees" 0/2 -> section = round(100*1/4) = 25.
    let env = setup();
    env.add_section("DSA Practice");
    env.add_sub("DSA Practice", "Arrays");
    env.add_sub("DSA Practice", "Trees");
    let a1 = env.add_task(&["Two sum", "--section", "DSA Practice", "--sub", "Arrays"]);
    env.add_task(&["Rotate array", "--section", "DSA Practice", "--sub", "Arrays"]);
    env.add_task(&["Invert tree", "--section", "DSA Practice", "--sub", "Trees"]);
    env.add_task(&["Level order", "--section", "DSA Practice", "--sub", "Trees"]);

    env.run_ok(&["task", "complete", &a1]);

    let v = env.run_ok(&["section", "show", "DSA Practice"]);
    assert_eq!(v["data"]["section"]["completion_percent"], 25);
    let subs = v["data"]["section"]["subsections"].as_array().unwrap();
    assert_eq!(subs[0]["title"], "Arrays");
    assert_eq!(subs[0]["completion_percent"], 50);
    assert_eq!(subs[1]["completion_percent"], 0);
}

#[test]
fn test_direct_task_section_percent() {
    let env = setup();
    env.add_section("inbox");
    let a = env.add_task(&["One", "--section", "inbox"]);
    env.add_task(&["Two", "--section", "inbox"]);
    env.run_ok(&["task", "complete", &a]);

    let v = env.run_ok(&["section", "show", "inbox"]);
    assert_eq!(v["data"]["section"]["completion_percent"], 50);
}

// ─── 7. cascades ───────────────────────────────────────────────────

#[test]
fn test_delete_section_cascades_to_tasks() {
    let env = setup();
    env.add_section("study");
    env.add_sub("study", "Arrays");
    env.add_task(&["Two sum", "--section", "study", "--sub", "Arrays"]);

    env.run_ok(&["section", "delete", "study"]);
    let v = env.run_ok(&["task", "list"]);
    assert_eq!(v["data"]["tasks"].as_array().unwrap().len(), 0);
}

#[test]
fn test_delete_subsection_cascades_to_tasks() {
    let env = setup();
    env.add_section("study");
    env.add_sub("study", "Arrays");
    env.add_sub("study", "Trees");
    env.add_task(&["Two sum", "--section", "study", "--sub", "Arrays"]);
    env.add_task(&["Invert tree", "--section", "study", "--sub", "Trees"]);

    env.run_ok(&["sub", "delete", "study", "Arrays"]);
    let v = env.run_ok(&["task", "list"]);
    let tasks = v["data"]["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "Invert tree");
}

// ─── 8. calendar and day views ─────────────────────────────────────

#[test]
fn test_calendar_month_stats() {
    let env = setup();
    env.add_section("inbox");
    let a = env.add_task(&[
        "Report", "--section", "inbox", "--kind", "deadline", "--due", "2030-04-10",
    ]);
    env.add_task(&[
        "Review", "--section", "inbox", "--kind", "deadline", "--due", "2030-04-10",
    ]);
    env.add_task(&["Daily", "--section", "inbox", "--due", "2030-04-12"]);
    env.run_ok(&["task", "complete", &a]);

    let v = env.run_ok(&["calendar", "2030", "4"]);
    let days = v["data"]["days"].as_object().unwrap();
    assert_eq!(days["10"]["t"], 2);
    assert_eq!(days["10"]["c"], 1);
    assert_eq!(days["10"]["percent"], 50);
    assert_eq!(days["12"]["t"], 1);
    assert_eq!(days["12"]["c"], 0);
    // A day with no applicable tasks is absent — no data, not 0% complete.
    assert!(!days.contains_key("11"));
}

#[test]
fn test_calendar_invalid_month() {
    let env = setup();
    let v = env.run_err(&["calendar", "2030", "13"]);
    assert_eq!(v["error"]["code"], "INVALID_INPUT");
}

#[test]
fn test_day_view() {
    let env = setup();
    env.add_section("inbox");
    let a = env.add_task(&[
        "Report", "--section", "inbox", "--kind", "deadline", "--due", "2030-04-10",
    ]);
    env.add_task(&[
        "Review", "--section", "inbox", "--kind", "deadline", "--due", "2030-04-10",
    ]);
    env.run_ok(&["task", "complete", &a]);

    let v = env.run_ok(&["day", "2030-04-10"]);
    assert_eq!(v["data"]["stats"]["t"], 2);
    assert_eq!(v["data"]["stats"]["c"], 1);
    assert_eq!(v["data"]["tasks"].as_array().unwrap().len(), 2);
}

// ─── 9. stats and rewards ──────────────────────────────────────────

#[test]
fn test_stats_snapshot_and_week() {
    let env = setup();
    env.add_section("inbox");
    let a = env.add_task(&["One", "--section", "inbox"]);
    env.add_task(&["Two", "--section", "inbox"]);
    env.run_ok(&["task", "complete", &a]);

    let v = env.run_ok(&["stats"]);
    assert_eq!(v["data"]["stats"]["tasks_completed"], 1);
    assert_eq!(v["data"]["stats"]["total_tasks"], 2);
    assert_eq!(v["data"]["stats"]["streak"], 1);

    let week = v["data"]["weekly"].as_array().unwrap();
    assert_eq!(week.len(), 7);
    // Both tasks default to today, the last window entry.
    assert_eq!(week[6]["total"], 2);
    assert_eq!(week[6]["completed"], 1);
    assert_eq!(week[6]["percent"], 50);
    assert_eq!(week[6]["hue"], 60.0);
}

#[test]
fn test_stats_empty_store() {
    let env = setup();
    let v = env.run_ok(&["stats"]);
    assert_eq!(v["data"]["stats"]["points"], 0);
    assert_eq!(v["data"]["stats"]["streak"], 0);
    assert_eq!(v["data"]["stats"]["total_tasks"], 0);
}

#[test]
fn test_rewards_catalog() {
    let env = setup();
    let v = env.run_ok(&["rewards"]);
    let achievements = v["data"]["achievements"].as_array().unwrap();
    assert_eq!(achievements.len(), 7);
    assert!(achievements.iter().all(|a| a["unlocked"] == false));

    env.add_section("inbox");
    let id = env.add_task(&["One", "--section", "inbox"]);
    env.run_ok(&["task", "complete", &id]);

    let v = env.run_ok(&["rewards"]);
    let achievements = v["data"]["achievements"].as_array().unwrap();
    let first = achievements.iter().find(|a| a["id"] == "first-steps").unwrap();
    assert_eq!(first["unlocked"], true);
}

// ─── 10. exit codes and text output ────────────────────────────────

#[test]
fn test_exit_code_0_on_success() {
    let env = TestEnv::new();
    let output = env.cmd().args(["init", "--json"]).output().unwrap();
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_exit_code_1_on_error() {
    let env = TestEnv::new();
    let output = env.cmd().args(["section", "list", "--json"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_text_output_init() {
    let env = TestEnv::new();
    env.cmd()
        .args(["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized prodiflow at"));
}

#[test]
fn test_text_output_section_list() {
    let env = setup();
    env.cmd()
        .args(["section", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No sections found"));
}

#[test]
fn test_text_output_error() {
    let env = TestEnv::new();
    env.cmd()
        .args(["section", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn test_text_output_complete() {
    let env = setup();
    env.add_section("inbox");
    let id = env.add_task(&["Water plants", "--section", "inbox"]);
    env.cmd()
        .args(["task", "complete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Achievement unlocked: 🎯 First Steps"));
}
