use hifz_srs::MistakeCounts;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ReviewError;

/// Shortest interval a reviewer may confirm for a page, in days.
pub const MIN_INTERVAL_DAYS: i64 = hifz_srs::MIN_INTERVAL_DAYS as i64;

/// Longest interval a reviewer may confirm for a page, in days. Proposals are
/// capped at the same value.
pub const MAX_INTERVAL_DAYS: i64 = hifz_srs::MAX_INTERVAL_DAYS as i64;

/// Mistake counts as submitted for a revision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RevisionEntry {
    #[validate(range(min = 0))]
    pub word_mistakes: i64,
    #[validate(range(min = 0))]
    pub line_mistakes: i64,
}

impl RevisionEntry {
    /// Build an entry from raw form fields.
    pub fn from_form(word_mistakes: &str, line_mistakes: &str) -> Result<Self, ReviewError> {
        Ok(Self {
            word_mistakes: parse_count("word_mistakes", word_mistakes)?,
            line_mistakes: parse_count("line_mistakes", line_mistakes)?,
        })
    }

    /// Validate the entry and convert it into mistake counts.
    pub fn counts(&self) -> Result<MistakeCounts, ReviewError> {
        self.validate()?;
        Ok(MistakeCounts::from_raw(self.word_mistakes, self.line_mistakes)?)
    }
}

/// Interval confirmed (and possibly adjusted) for a revision being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct IntervalEntry {
    #[validate(range(min = MIN_INTERVAL_DAYS, max = MAX_INTERVAL_DAYS))]
    pub next_interval: i64,
}

impl IntervalEntry {
    pub const fn new(next_interval: i64) -> Self {
        Self { next_interval }
    }

    pub fn from_form(next_interval: &str) -> Result<Self, ReviewError> {
        Ok(Self {
            next_interval: parse_count("next_interval", next_interval)?,
        })
    }

    /// Validate the entry and return the interval in days.
    pub fn days(&self) -> Result<u32, ReviewError> {
        self.validate()?;
        u32::try_from(self.next_interval).map_err(|_| {
            ReviewError::InvalidInput(format!(
                "next_interval must be between {MIN_INTERVAL_DAYS} and {MAX_INTERVAL_DAYS}"
            ))
        })
    }
}

/// Parse a whole, non-negative number typed into a form field.
///
/// # Examples
/// ```
/// use hifz_review::validation::parse_count;
///
/// assert_eq!(parse_count("word_mistakes", " 3 ").unwrap(), 3);
/// assert!(parse_count("word_mistakes", "-1").is_err());
/// assert!(parse_count("word_mistakes", "2.5").is_err());
/// ```
pub fn parse_count(field: &str, raw: &str) -> Result<i64, ReviewError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ReviewError::InvalidInput(format!("{field} is required")));
    }

    let value: i64 = raw.parse().map_err(|_| {
        ReviewError::InvalidInput(format!("{field} must be a whole number (got '{raw}')"))
    })?;

    if value < 0 {
        return Err(ReviewError::InvalidInput(format!(
            "{field} cannot be negative (got {value})"
        )));
    }

    Ok(value)
}
