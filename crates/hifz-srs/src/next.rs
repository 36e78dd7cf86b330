//! Choosing the interval for a revision that is being entered now.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{PageSummary, Score, SrsError, get_page_score};

/// Shortest interval a new revision can be scheduled with.
pub const MIN_INTERVAL_DAYS: u32 = 1;

/// Longest interval a new revision can be scheduled with.
pub const MAX_INTERVAL_DAYS: u32 = 3650;

/// Suggested schedule for a revision being entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextRevision {
    pub score: Score,
    pub interval_delta: i32,
    pub next_interval: u32,
    pub next_due_date: NaiveDate,
}

/// Apply `score`'s delta to a base interval, kept within
/// [`MIN_INTERVAL_DAYS`]..=[`MAX_INTERVAL_DAYS`].
pub fn next_interval(scheduled_interval: u32, score: Score) -> u32 {
    let shifted = i64::from(scheduled_interval) + i64::from(score.interval_delta());
    let clamped = shifted.clamp(i64::from(MIN_INTERVAL_DAYS), i64::from(MAX_INTERVAL_DAYS));
    u32::try_from(clamped).unwrap_or(MAX_INTERVAL_DAYS)
}

/// Work out the interval and due date for a revision recorded `today` on a
/// page whose history is `summary`.
pub fn plan_next_revision(
    summary: &PageSummary,
    word_mistakes: u32,
    line_mistakes: u32,
    today: NaiveDate,
) -> Result<NextRevision, SrsError> {
    let score = get_page_score(word_mistakes, line_mistakes);
    let next_interval = next_interval(summary.scheduled_interval, score);
    let next_due_date = today
        .checked_add_days(Days::new(u64::from(next_interval)))
        .ok_or(SrsError::DateOutOfRange {
            date: today,
            days: next_interval,
        })?;

    Ok(NextRevision {
        score,
        interval_delta: score.interval_delta(),
        next_interval,
        next_due_date,
    })
}
