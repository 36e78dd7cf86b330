//! Mistake classification and the interval adjustment attached to each score.

use serde::{Deserialize, Serialize};

use crate::SrsError;

/// Ordinal classification of how well a page was recited.
///
/// Variants are declared worst-first so the derived `Ord` reads naturally:
/// `Score::Poor < Score::Excellent`, and "the worse of two scores" is `min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Score {
    Poor,
    Weak,
    Fair,
    Good,
    Excellent,
}

impl Score {
    /// Every score, best first.
    pub const ALL: [Self; 5] = [
        Self::Excellent,
        Self::Good,
        Self::Fair,
        Self::Weak,
        Self::Poor,
    ];

    /// Position in the ordinal scale, `0` for [`Score::Poor`] up to `4` for
    /// [`Score::Excellent`].
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Days added to (or removed from) the base interval after a revision
    /// with this score.
    ///
    /// The result is not floored; see [`crate::next_interval`].
    pub const fn interval_delta(self) -> i32 {
        match self {
            Self::Excellent => 3,
            Self::Good => 1,
            Self::Fair => 0,
            Self::Weak => -2,
            Self::Poor => -4,
        }
    }
}

/// Score-to-delta lookup table, best score first.
///
/// Built from [`Score::interval_delta`], whose exhaustive match makes a
/// missing entry a compile error.
pub const INTERVAL_DELTAS: [(Score, i32); 5] = [
    (Score::Excellent, Score::Excellent.interval_delta()),
    (Score::Good, Score::Good.interval_delta()),
    (Score::Fair, Score::Fair.interval_delta()),
    (Score::Weak, Score::Weak.interval_delta()),
    (Score::Poor, Score::Poor.interval_delta()),
];

/// Upper bound (inclusive) of mistakes still classified as `score`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoint {
    pub max_mistakes: u32,
    pub score: Score,
}

const fn breakpoint(max_mistakes: u32, score: Score) -> Breakpoint {
    Breakpoint {
        max_mistakes,
        score,
    }
}

/// Word-level mistake thresholds, ascending. Anything above the last entry is
/// [`Score::Poor`].
pub const WORD_MISTAKE_BREAKPOINTS: &[Breakpoint] = &[
    breakpoint(0, Score::Excellent),
    breakpoint(1, Score::Good),
    breakpoint(3, Score::Fair),
    breakpoint(5, Score::Weak),
];

/// Line-level mistake thresholds, ascending. A forgotten line weighs more than
/// a wrong word, so the buckets are narrower. Anything above the last entry is
/// [`Score::Poor`].
pub const LINE_MISTAKE_BREAKPOINTS: &[Breakpoint] = &[
    breakpoint(0, Score::Excellent),
    breakpoint(1, Score::Fair),
    breakpoint(2, Score::Weak),
];

fn classify(mistakes: u32, breakpoints: &[Breakpoint]) -> Score {
    breakpoints
        .iter()
        .find(|bp| mistakes <= bp.max_mistakes)
        .map_or(Score::Poor, |bp| bp.score)
}

/// Classify a revision by its mistake counts.
///
/// Each count is bucketed on its own table and the worse bucket wins, so more
/// mistakes of either kind never improve the score.
pub fn get_page_score(word_mistakes: u32, line_mistakes: u32) -> Score {
    classify(word_mistakes, WORD_MISTAKE_BREAKPOINTS)
        .min(classify(line_mistakes, LINE_MISTAKE_BREAKPOINTS))
}

/// Validated pair of mistake counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MistakeCounts {
    pub word_mistakes: u32,
    pub line_mistakes: u32,
}

impl MistakeCounts {
    pub const fn new(word_mistakes: u32, line_mistakes: u32) -> Self {
        Self {
            word_mistakes,
            line_mistakes,
        }
    }

    /// Build counts from unchecked integers, e.g. values read from a form or
    /// a foreign row type.
    pub fn from_raw(word_mistakes: i64, line_mistakes: i64) -> Result<Self, SrsError> {
        Ok(Self {
            word_mistakes: to_count("word_mistakes", word_mistakes)?,
            line_mistakes: to_count("line_mistakes", line_mistakes)?,
        })
    }

    pub fn score(self) -> Score {
        get_page_score(self.word_mistakes, self.line_mistakes)
    }
}

fn to_count(field: &str, value: i64) -> Result<u32, SrsError> {
    if value < 0 {
        return Err(SrsError::InvalidInput(format!(
            "{field} cannot be negative (got {value})"
        )));
    }
    u32::try_from(value)
        .map_err(|_| SrsError::InvalidInput(format!("{field} is too large (got {value})")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_mistakes_is_best_score() {
        assert_eq!(get_page_score(0, 0), Score::Excellent);
        assert!(Score::Excellent.interval_delta() >= 0);
    }

    #[test]
    fn test_word_mistake_buckets() {
        assert_eq!(get_page_score(1, 0), Score::Good);
        assert_eq!(get_page_score(2, 0), Score::Fair);
        assert_eq!(get_page_score(3, 0), Score::Fair);
        assert_eq!(get_page_score(4, 0), Score::Weak);
        assert_eq!(get_page_score(5, 0), Score::Weak);
        assert_eq!(get_page_score(6, 0), Score::Poor);
        assert_eq!(get_page_score(u32::MAX, 0), Score::Poor);
    }

    #[test]
    fn test_line_mistake_buckets() {
        assert_eq!(get_page_score(0, 1), Score::Fair);
        assert_eq!(get_page_score(0, 2), Score::Weak);
        assert_eq!(get_page_score(0, 3), Score::Poor);
    }

    #[test]
    fn test_worse_bucket_wins() {
        // Good on words, Weak on lines
        assert_eq!(get_page_score(1, 2), Score::Weak);
        // Poor on words, Fair on lines
        assert_eq!(get_page_score(7, 1), Score::Poor);
    }

    #[test]
    fn test_score_is_monotonic_in_both_counts() {
        for word in 0..12 {
            for line in 0..8 {
                let score = get_page_score(word, line);
                assert!(get_page_score(word + 1, line) <= score, "word {word} line {line}");
                assert!(get_page_score(word, line + 1) <= score, "word {word} line {line}");
            }
        }
    }

    #[test]
    fn test_classification_is_repeatable() {
        for (word, line) in [(0, 0), (2, 1), (9, 4)] {
            assert_eq!(get_page_score(word, line), get_page_score(word, line));
        }
    }

    #[test]
    fn test_breakpoints_are_ascending() {
        for table in [WORD_MISTAKE_BREAKPOINTS, LINE_MISTAKE_BREAKPOINTS] {
            assert!(table.windows(2).all(|w| w[0].max_mistakes < w[1].max_mistakes));
            assert!(table.windows(2).all(|w| w[0].score > w[1].score));
        }
    }

    #[test]
    fn test_interval_deltas_cover_every_score() {
        for score in Score::ALL {
            let entries: Vec<_> = INTERVAL_DELTAS.iter().filter(|(s, _)| *s == score).collect();
            assert_eq!(entries.len(), 1, "{score:?}");
            assert_eq!(entries[0].1, score.interval_delta());
        }
    }

    #[test]
    fn test_interval_delta_signs() {
        assert!(Score::Excellent.interval_delta() >= 0);
        assert!(Score::Good.interval_delta() >= 0);
        assert!(Score::Weak.interval_delta() < 0);
        assert!(Score::Poor.interval_delta() < 0);
        // Better scores never shrink the interval more than worse ones
        assert!(INTERVAL_DELTAS.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_rank_follows_order() {
        assert_eq!(Score::Poor.rank(), 0);
        assert_eq!(Score::Excellent.rank(), 4);
        assert!(Score::ALL.windows(2).all(|w| w[0].rank() > w[1].rank()));
    }

    #[test]
    fn test_mistake_counts_from_raw() {
        assert_eq!(
            MistakeCounts::from_raw(2, 1),
            Ok(MistakeCounts::new(2, 1))
        );
        assert!(matches!(
            MistakeCounts::from_raw(-1, 0),
            Err(SrsError::InvalidInput(_))
        ));
        assert!(matches!(
            MistakeCounts::from_raw(0, -3),
            Err(SrsError::InvalidInput(_))
        ));
        assert!(matches!(
            MistakeCounts::from_raw(i64::MAX, 0),
            Err(SrsError::InvalidInput(_))
        ));
        assert_eq!(MistakeCounts::new(0, 2).score(), Score::Weak);
    }
}
