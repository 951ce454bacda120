//! Pure aggregation engine: completion percentages, streaks, points,
//! calendar/weekly statistics, achievement evaluation. Every function here
//! takes an immutable snapshot of the task tree and returns a fresh result;
//! nothing is incrementally patched and nothing performs I/O.

pub mod achievements;
pub mod calendar;
pub mod progress;
pub mod streak;
