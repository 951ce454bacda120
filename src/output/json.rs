use std::collections::{BTreeMap, HashSet};

use serde_json::{json, Value};

use crate::engine::calendar::{heatmap_hue, DayStats, WeekDayStats};
use crate::engine::progress;
use crate::error::ProdiflowError;
use crate::models::{AchievementRule, Section, StatsSnapshot, Subsection, Task};

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &ProdiflowError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

pub fn task_json(t: &Task) -> Value {
    json!({
        "id": t.id,
        "section_id": t.section_id,
        "subsection_id": t.subsection_id,
        "title": t.title,
        "kind": t.kind.as_str(),
        "scheduled_on": t.scheduled_on.map(|d| d.format("%Y-%m-%d").to_string()),
        "priority": t.priority.as_str(),
        "tags": t.tags,
        "status": t.status.as_str(),
        "created_at": t.created_at,
        "completed_at": t.completed_at
    })
}

pub fn task_summary(t: &Task) -> Value {
    json!({
        "id": t.id,
        "title": t.title,
        "kind": t.kind.as_str(),
        "priority": t.priority.as_str(),
        "status": t.status.as_str()
    })
}

pub fn subsection_json(s: &Subsection) -> Value {
    json!({
        "id": s.id,
        "title": s.title,
        "completion_percent": progress::subsection_percent(s),
        "tasks": s.tasks.iter().map(task_summary).collect::<Vec<_>>()
    })
}

pub fn section_json(s: &Section) -> Value {
    json!({
        "id": s.id,
        "title": s.title,
        "icon": s.icon,
        "completion_percent": progress::container_percent(s),
        "subsections": s.subsections.iter().map(subsection_json).collect::<Vec<_>>(),
        "tasks": s.tasks.iter().map(task_summary).collect::<Vec<_>>()
    })
}

pub fn stats_json(s: &StatsSnapshot) -> Value {
    json!({
        "points": s.total_points,
        "streak": s.current_streak,
        "tasks_completed": s.tasks_completed,
        "total_tasks": s.total_tasks
    })
}

/// Month map keyed by day-of-month. Days with no applicable tasks are
/// absent, never rendered as 0%-complete.
pub fn calendar_json(days: &BTreeMap<u32, DayStats>) -> Value {
    let mut map = serde_json::Map::new();
    for (day, stats) in days {
        let percent = if stats.total > 0 {
            progress::ratio_percent(u64::from(stats.completed), u64::from(stats.total))
                .unwrap_or(0)
        } else {
            0
        };
        map.insert(
            day.to_string(),
            json!({
                "t": stats.total,
                "c": stats.completed,
                "percent": percent,
                "hue": heatmap_hue(percent)
            }),
        );
    }
    Value::Object(map)
}

pub fn week_json(week: &[WeekDayStats]) -> Value {
    json!(week
        .iter()
        .map(|d| json!({
            "date": d.date.format("%Y-%m-%d").to_string(),
            "total": d.total,
            "completed": d.completed,
            "percent": d.percent,
            "hue": heatmap_hue(d.percent)
        }))
        .collect::<Vec<_>>())
}

pub fn achievement_json(rule: &AchievementRule, unlocked: &HashSet<String>) -> Value {
    json!({
        "id": rule.id,
        "title": rule.title,
        "description": rule.description,
        "icon": rule.icon,
        "point_reward": rule.point_reward,
        "unlocked": unlocked.contains(rule.id)
    })
}
