use std::collections::{BTreeMap, HashSet};

use crate::engine::calendar::{DayStats, WeekDayStats};
use crate::engine::progress;
use crate::models::{AchievementRule, Section, StatsSnapshot, Task};

pub fn print_section_list(sections: &[Section]) {
    if sections.is_empty() {
        println!("No sections found.");
        return;
    }
    for s in sections {
        let task_count: usize =
            s.tasks.len() + s.subsections.iter().map(|sub| sub.tasks.len()).sum::<usize>();
        println!(
            "  {} {} ({}) {}% - {} subsections, {} tasks",
            s.icon,
            s.title,
            &s.id[..8],
            progress::container_percent(s),
            s.subsections.len(),
            task_count
        );
    }
}

pub fn print_section(s: &Section) {
    println!("Section: {} {} ({})", s.icon, s.title, s.id);
    println!("  Progress: {}%", progress::container_percent(s));
    for sub in &s.subsections {
        println!(
            "  Subsection: {} ({}) {}%",
            sub.title,
            &sub.id[..8],
            progress::subsection_percent(sub)
        );
        print_task_list(&sub.tasks);
    }
    if !s.tasks.is_empty() {
        print_task_list(&s.tasks);
    }
}

pub fn print_task(t: &Task) {
    println!("Task: {} ({})", t.title, t.id);
    println!("  Kind: {}", t.kind.as_str());
    if let Some(date) = t.scheduled_on {
        println!("  Scheduled: {date}");
    }
    println!("  Priority: {}", t.priority.as_str());
    if !t.tags.is_empty() {
        println!("  Tags: {}", t.tags.join(", "));
    }
    println!("  Status: {}", t.status.as_str());
    if let Some(ref completed) = t.completed_at {
        println!("  Completed: {completed}");
    }
}

pub fn print_task_list(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("  No tasks found.");
        return;
    }
    for t in tasks {
        let mark = if t.is_completed() { "x" } else { " " };
        println!(
            "  [{}] {} ({}) {} {}",
            mark,
            t.title,
            &t.id[..std::cmp::min(8, t.id.len())],
            t.kind.as_str(),
            t.priority.as_str()
        );
    }
}

pub fn print_stats(s: &StatsSnapshot) {
    println!("Points: {}", s.total_points);
    println!("Streak: {} day(s)", s.current_streak);
    println!("Completed: {}/{}", s.tasks_completed, s.total_tasks);
}

pub fn print_week(week: &[WeekDayStats]) {
    println!("Last 7 days:");
    for d in week {
        if d.total == 0 {
            println!("  {}  no tasks", d.date);
        } else {
            println!("  {}  {}/{} ({}%)", d.date, d.completed, d.total, d.percent);
        }
    }
}

pub fn print_calendar(year: i32, month: u32, days: &BTreeMap<u32, DayStats>) {
    println!("Calendar {year}-{month:02}:");
    if days.is_empty() {
        println!("  No tasks this month.");
        return;
    }
    for (day, stats) in days {
        println!("  {year}-{month:02}-{day:02}  {}/{}", stats.completed, stats.total);
    }
}

pub fn print_achievements(catalog: &[AchievementRule], unlocked: &HashSet<String>) {
    for rule in catalog {
        let mark = if unlocked.contains(rule.id) { rule.icon } else { "🔒" };
        println!(
            "  {} {} (+{}) - {}",
            mark, rule.title, rule.point_reward, rule.description
        );
    }
}
