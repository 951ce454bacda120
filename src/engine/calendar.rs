use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::error::ProdiflowError;
use crate::models::Task;

/// Per-day pair for the month heatmap. A day absent from the map has no
/// applicable tasks ("no data"), which is distinct from a present day with
/// zero completions.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DayStats {
    #[serde(rename = "t")]
    pub total: u32,
    #[serde(rename = "c")]
    pub completed: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct WeekDayStats {
    pub date: NaiveDate,
    pub total: u32,
    pub completed: u32,
    pub percent: u8,
}

/// The calendar date a task counts toward: the target day of a daily task,
/// the due date of a deadline task.
pub fn applicable_date(task: &Task) -> Result<NaiveDate, ProdiflowError> {
    task.scheduled_on.ok_or_else(|| {
        ProdiflowError::invalid_input(format!("task {} has no applicable date", task.id))
    })
}

/// Per-day {total, completed} pairs for one month. Only days with at least
/// one applicable task appear.
pub fn calendar_stats(
    tasks: &[Task],
    year: i32,
    month: u32,
) -> Result<BTreeMap<u32, DayStats>, ProdiflowError> {
    if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
        return Err(ProdiflowError::invalid_input(format!(
            "invalid year/month: {year}-{month}"
        )));
    }

    let mut days: BTreeMap<u32, DayStats> = BTreeMap::new();
    for task in tasks {
        let date = applicable_date(task)?;
        if date.year() != year || date.month() != month {
            continue;
        }
        let entry = days.entry(date.day()).or_default();
        entry.total += 1;
        if task.is_completed() {
            entry.completed += 1;
        }
    }
    Ok(days)
}

/// Trailing window of 7 days ending on the reference date, oldest first.
/// percent is 0 when a day has no applicable tasks.
pub fn weekly_stats(
    tasks: &[Task],
    reference: NaiveDate,
) -> Result<Vec<WeekDayStats>, ProdiflowError> {
    let start = reference.checked_sub_days(Days::new(6)).ok_or_else(|| {
        ProdiflowError::invalid_input(format!("reference date {reference} out of range"))
    })?;

    let mut week: Vec<WeekDayStats> = (0..7)
        .map(|i| WeekDayStats {
            date: start + chrono::Duration::days(i),
            total: 0,
            completed: 0,
            percent: 0,
        })
        .collect();

    for task in tasks {
        let date = applicable_date(task)?;
        if date < start || date > reference {
            continue;
        }
        let idx = (date - start).num_days() as usize;
        week[idx].total += 1;
        if task.is_completed() {
            week[idx].completed += 1;
        }
    }

    for day in &mut week {
        if day.total > 0 {
            day.percent = ((u64::from(day.completed) * 200 + u64::from(day.total))
                / (u64::from(day.total) * 2)) as u8;
        }
    }
    Ok(week)
}

/// Linear health hue: 0% -> 0 (red) ... 100% -> 120 (green). Rendering hint
/// only; surfaced alongside the {t, c, percent} triple in JSON output.
pub fn heatmap_hue(percent: u8) -> f64 {
    120.0 * f64::from(percent.min(100)) / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, TaskKind, TaskStatus};

    fn task_on(year: i32, month: u32, day: u32, completed: bool) -> Task {
        Task {
            id: format!("{year}-{month}-{day}-{completed}"),
            section_id: "s".into(),
            subsection_id: None,
            title: "t".into(),
            kind: TaskKind::Daily,
            scheduled_on: NaiveDate::from_ymd_opt(year, month, day),
            priority: Priority::Medium,
            tags: vec![],
            status: if completed {
                TaskStatus::Completed
            } else {
                TaskStatus::Pending
            },
            created_at: String::new(),
            completed_at: None,
        }
    }

    #[test]
    fn month_counts_per_day() {
        let tasks = vec![
            task_on(2026, 5, 10, true),
            task_on(2026, 5, 10, true),
            task_on(2026, 5, 10, false),
            task_on(2026, 5, 12, false),
            task_on(2026, 6, 1, true), // other month, ignored
        ];
        let days = calendar_stats(&tasks, 2026, 5).unwrap();
        assert_eq!(days[&10].total, 3);
        assert_eq!(days[&10].completed, 2);
        assert_eq!(days[&12].total, 1);
        assert_eq!(days[&12].completed, 0);
        // Day with no tasks is absent, not {0, 0}.
        assert!(!days.contains_key(&11));
    }

    #[test]
    fn invalid_month_rejected() {
        let err = calendar_stats(&[], 2026, 13).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidInput);
    }

    #[test]
    fn missing_applicable_date_rejected() {
        let mut t = task_on(2026, 5, 10, false);
        t.scheduled_on = None;
        let err = calendar_stats(&[t], 2026, 5).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidInput);
    }

    #[test]
    fn weekly_window_is_seven_days_ending_reference() {
        let reference = NaiveDate::from_ymd_opt(2026, 5, 10).unwrap();
        let tasks = vec![
            task_on(2026, 5, 4, true),  // first day of window
            task_on(2026, 5, 3, true),  // before window, ignored
            task_on(2026, 5, 10, true), // last day
            task_on(2026, 5, 10, false),
        ];
        let week = weekly_stats(&tasks, reference).unwrap();
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, NaiveDate::from_ymd_opt(2026, 5, 4).unwrap());
        assert_eq!(week[0].total, 1);
        assert_eq!(week[0].percent, 100);
        assert_eq!(week[6].date, reference);
        assert_eq!(week[6].total, 2);
        assert_eq!(week[6].completed, 1);
        assert_eq!(week[6].percent, 50);
        // Empty days report percent 0.
        assert_eq!(week[1].total, 0);
        assert_eq!(week[1].percent, 0);
    }

    #[test]
    fn hue_is_linear_and_clamped() {
        assert_eq!(heatmap_hue(0), 0.0);
        assert_eq!(heatmap_hue(50), 60.0);
        assert_eq!(heatmap_hue(100), 120.0);
        assert_eq!(heatmap_hue(200), 120.0);
    }
}
