use std::collections::HashSet;

use crate::models::{AchievementRule, StatsSnapshot, Threshold};

/// Achievements whose predicate transitions false -> true at this snapshot.
/// The caller persists the unlocked set; re-evaluating with the updated set
/// returns nothing, so a reward is never paid twice.
pub fn evaluate(
    snapshot: &StatsSnapshot,
    previously_unlocked: &HashSet<String>,
    catalog: &[AchievementRule],
) -> Vec<AchievementRule> {
    catalog
        .iter()
        .filter(|rule| !previously_unlocked.contains(rule.id) && rule.is_satisfied(snapshot))
        .cloned()
        .collect()
}

pub fn default_catalog() -> Vec<AchievementRule> {
    vec![
        AchievementRule {
            id: "first-steps",
            title: "First Steps",
            description: "Complete your first task",
            icon: "🎯",
            point_reward: 50,
            threshold: Threshold::TasksCompleted(1),
        },
        AchievementRule {
            id: "task-10",
            title: "Getting Things Done",
            description: "Complete 10 tasks",
            icon: "⚡",
            point_reward: 100,
            threshold: Threshold::TasksCompleted(10),
        },
        AchievementRule {
            id: "centurion",
            title: "Centurion",
            description: "Complete 100 tasks",
            icon: "🏆",
            point_reward: 500,
            threshold: Threshold::TasksCompleted(100),
        },
        AchievementRule {
            id: "streak-3",
            title: "On a Roll",
            description: "Keep a 3-day streak",
            icon: "🔥",
            point_reward: 75,
            threshold: Threshold::StreakDays(3),
        },
        AchievementRule {
            id: "streak-7",
            title: "Week Warrior",
            description: "Keep a 7-day streak",
            icon: "💪",
            point_reward: 200,
            threshold: Threshold::StreakDays(7),
        },
        AchievementRule {
            id: "streak-30",
            title: "Unstoppable",
            description: "Keep a 30-day streak",
            icon: "🌟",
            point_reward: 1000,
            threshold: Threshold::StreakDays(30),
        },
        AchievementRule {
            id: "points-1000",
            title: "Point Collector",
            description: "Earn 1000 points",
            icon: "⭐",
            point_reward: 250,
            threshold: Threshold::TotalPoints(1000),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(points: i64, streak: u32, completed: i64) -> StatsSnapshot {
        StatsSnapshot {
            total_points: points,
            current_streak: streak,
            tasks_completed: completed,
            total_tasks: completed,
        }
    }

    #[test]
    fn centurion_unlocks_once() {
        let catalog = vec![AchievementRule {
            id: "centurion",
            title: "Centurion",
            description: "Complete 100 tasks",
            icon: "🏆",
            point_reward: 500,
            threshold: Threshold::TasksCompleted(100),
        }];
        let snap = snapshot(0, 0, 100);

        let newly = evaluate(&snap, &HashSet::new(), &catalog);
        assert_eq!(newly.len(), 1);
        assert_eq!(newly[0].id, "centurion");

        let unlocked: HashSet<String> = ["centurion".to_string()].into_iter().collect();
        assert!(evaluate(&snap, &unlocked, &catalog).is_empty());
    }

    #[test]
    fn below_threshold_stays_locked() {
        let catalog = default_catalog();
        let newly = evaluate(&snapshot(0, 0, 0), &HashSet::new(), &catalog);
        assert!(newly.is_empty());
    }

    #[test]
    fn multiple_rules_unlock_together() {
        let catalog = default_catalog();
        let newly = evaluate(&snapshot(1000, 7, 10), &HashSet::new(), &catalog);
        let ids: Vec<&str> = newly.iter().map(|r| r.id).collect();
        assert!(ids.contains(&"first-steps"));
        assert!(ids.contains(&"task-10"));
        assert!(ids.contains(&"streak-3"));
        assert!(ids.contains(&"streak-7"));
        assert!(ids.contains(&"points-1000"));
        assert!(!ids.contains(&"centurion"));
        assert!(!ids.contains(&"streak-30"));
    }
}
