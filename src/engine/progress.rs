use crate::error::ProdiflowError;
use crate::models::{Section, Subsection, Task};

/// Round-half-up integer percent, in [0, 100]. Callers guarantee
/// completed <= total; the public checked entry is `ratio_percent`.
fn round_percent(completed: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    ((completed * 200 + total) / (total * 2)) as u8
}

/// Percent from raw counts. Rejects completed > total so a malformed
/// producer can never yield a value outside [0, 100].
pub fn ratio_percent(completed: u64, total: u64) -> Result<u8, ProdiflowError> {
    if completed > total {
        return Err(ProdiflowError::invalid_input(format!(
            "completed count {completed} exceeds total {total}"
        )));
    }
    Ok(round_percent(completed, total))
}

/// Completion percent of a flat task list. Empty list is 0, not an error.
pub fn completion_percent(tasks: &[Task]) -> u8 {
    let total = tasks.len() as u64;
    let completed = tasks.iter().filter(|t| t.is_completed()).count() as u64;
    round_percent(completed, total)
}

pub fn subsection_percent(subsection: &Subsection) -> u8 {
    completion_percent(&subsection.tasks)
}

/// Section percent. With subsections it is the weighted aggregate
/// (sum of completed over sum of totals), not an average of subsection
/// percentages; without subsections it falls back to the direct task list.
pub fn container_percent(section: &Section) -> u8 {
    if section.subsections.is_empty() {
        return completion_percent(&section.tasks);
    }
    let total: u64 = section.subsections.iter().map(|s| s.tasks.len() as u64).sum();
    let completed: u64 = section
        .subsections
        .iter()
        .map(|s| s.tasks.iter().filter(|t| t.is_completed()).count() as u64)
        .sum();
    round_percent(completed, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, TaskKind, TaskStatus};
    use chrono::NaiveDate;

    fn task(status: TaskStatus) -> Task {
        Task {
            id: "t".into(),
            section_id: "s".into(),
            subsection_id: None,
            title: "t".into(),
            kind: TaskKind::Daily,
            scheduled_on: NaiveDate::from_ymd_opt(2026, 1, 1),
            priority: Priority::Medium,
            tags: vec![],
            status,
            created_at: "2026-01-01 00:00:00".into(),
            completed_at: None,
        }
    }

    fn tasks(completed: usize, pending: usize) -> Vec<Task> {
        let mut v: Vec<Task> = (0..completed).map(|_| task(TaskStatus::Completed)).collect();
        v.extend((0..pending).map(|_| task(TaskStatus::Pending)));
        v
    }

    fn subsection(completed: usize, pending: usize) -> Subsection {
        Subsection {
            id: "sub".into(),
            section_id: "s".into(),
            title: "sub".into(),
            created_at: String::new(),
            tasks: tasks(completed, pending),
        }
    }

    fn section(subsections: Vec<Subsection>, direct: Vec<Task>) -> Section {
        Section {
            id: "s".into(),
            title: "s".into(),
            icon: "#".into(),
            created_at: String::new(),
            subsections,
            tasks: direct,
        }
    }

    #[test]
    fn empty_list_is_zero() {
        assert_eq!(completion_percent(&[]), 0);
    }

    #[test]
    fn all_completed_is_hundred() {
        assert_eq!(completion_percent(&tasks(3, 0)), 100);
    }

    #[test]
    fn percent_stays_in_range() {
        for c in 0..=7 {
            let p = completion_percent(&tasks(c, 7 - c));
            assert!(p <= 100);
        }
    }

    #[test]
    fn rounds_half_up() {
        // 1/8 = 12.5 -> 13
        assert_eq!(completion_percent(&tasks(1, 7)), 13);
        // 2/5 = 40.0 -> 40
        assert_eq!(completion_percent(&tasks(2, 3)), 40);
    }

    #[test]
    fn ratio_rejects_completed_over_total() {
        assert!(ratio_percent(5, 3).is_err());
        assert_eq!(ratio_percent(0, 0).unwrap(), 0);
    }

    #[test]
    fn section_percent_is_weighted_not_averaged() {
        // A: 1/1 (100%), B: 1/4 (25%). Weighted: 2/5 = 40, not (100+25)/2 = 63.
        let s = section(vec![subsection(1, 0), subsection(1, 3)], vec![]);
        assert_eq!(container_percent(&s), 40);
    }

    #[test]
    fn section_without_subsections_uses_direct_tasks() {
        let s = section(vec![], tasks(1, 1));
        assert_eq!(container_percent(&s), 50);
    }

    #[test]
    fn section_with_empty_subsections_is_zero() {
        let s = section(vec![subsection(0, 0), subsection(0, 0)], vec![]);
        assert_eq!(container_percent(&s), 0);
    }

    #[test]
    fn dsa_practice_scenario() {
        // "Arrays" 1/2, "Trees" 0/2 -> round(100 * 1/4) = 25
        let s = section(vec![subsection(1, 1), subsection(0, 2)], vec![]);
        assert_eq!(container_percent(&s), 25);
    }
}
