use serde::Serialize;

/// Derived snapshot of cumulative stats. Rebuilt from the store on every
/// read; never patched incrementally.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StatsSnapshot {
    pub total_points: i64,
    pub current_streak: u32,
    pub tasks_completed: i64,
    pub total_tasks: i64,
}
