use std::collections::HashSet;

use chrono::NaiveDate;

/// Fixed award per task completion. The running total lives in the profile
/// store and is authoritative; it is never recomputed from task counts.
pub const POINTS_PER_COMPLETION: i64 = 50;

/// Length of the maximal run of consecutive calendar days ending today on
/// which at least one task was completed. If today has no completion the
/// run is measured ending yesterday: an existing streak survives until a
/// full day passes with no completion.
pub fn current_streak(completion_dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let days: HashSet<NaiveDate> = completion_dates.iter().copied().collect();
    if days.is_empty() {
        return 0;
    }

    let mut cursor = if days.contains(&today) {
        Some(today)
    } else {
        today.pred_opt()
    };

    let mut streak = 0;
    while let Some(day) = cursor {
        if !days.contains(&day) {
            break;
        }
        streak += 1;
        cursor = day.pred_opt();
    }
    streak
}
