use serde::Serialize;

use super::StatsSnapshot;

/// Threshold predicate over a stats snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Threshold {
    TasksCompleted(i64),
    StreakDays(u32),
    TotalPoints(i64),
}

#[derive(Debug, Clone, Serialize)]
pub struct AchievementRule {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub point_reward: i64,
    pub threshold: Threshold,
}

impl AchievementRule {
    pub fn is_satisfied(&self, snapshot: &StatsSnapshot) -> bool {
        match self.threshold {
            Threshold::TasksCompleted(n) => snapshot.tasks_completed >= n,
            Threshold::StreakDays(n) => snapshot.current_streak >= n,
            Threshold::TotalPoints(n) => snapshot.total_points >= n,
        }
    }
}
