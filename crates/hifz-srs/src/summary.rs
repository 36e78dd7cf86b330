//! Folding a page's revision history into a [`PageSummary`].

use std::{borrow::Cow, collections::BTreeMap};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{Score, SrsError, get_page_score};

/// Page number within the memorized text.
pub type PageId = u32;

/// One recorded review of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRecord {
    /// Day the review took place
    pub date: NaiveDate,
    /// Wrong or skipped words
    pub word_mistakes: u32,
    /// Forgotten lines
    pub line_mistakes: u32,
    /// Interval in days chosen when this revision was recorded
    pub current_interval: u32,
}

/// Running state of a page, recomputed from its history on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    /// Number of revisions folded; `1` for a page with no history yet
    pub revision_number: u32,
    /// Date of the latest revision, or today for a page with no history
    pub revision_date: NaiveDate,
    pub score: Option<Score>,
    pub current_interval: Option<u32>,
    pub interval_delta: Option<i32>,
    /// Highest interval the page has ever reached
    pub max_interval: Option<u32>,
    /// Base for the next scheduling decision
    pub scheduled_interval: u32,
    /// Latest revision date plus its recorded interval
    pub scheduled_due_date: Option<NaiveDate>,
}

impl PageSummary {
    /// Summary of a page that has never been revised.
    pub const fn empty(today: NaiveDate) -> Self {
        Self {
            revision_number: 1,
            revision_date: today,
            score: None,
            current_interval: None,
            interval_delta: None,
            max_interval: None,
            scheduled_interval: 0,
            scheduled_due_date: None,
        }
    }

    /// Whether the page is due on `today` or earlier. A page with no history
    /// has no due date and is never due.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.scheduled_due_date.is_some_and(|due| due <= today)
    }
}

/// Summarize the revision history of a single page.
///
/// `records` are expected in ascending date order. Out-of-order input is
/// sorted (stably, so revisions on the same day keep their relative order)
/// before folding.
///
/// `scheduled_due_date` is derived from the interval stored with the last
/// revision, not from the interval that revision's score would suggest next.
pub fn summarize_page(
    page: PageId,
    records: &[RevisionRecord],
    today: NaiveDate,
) -> Result<PageSummary, SrsError> {
    let records = chronological(page, records);

    let Some(first) = records.first() else {
        return Ok(PageSummary::empty(today));
    };

    let mut max_interval = first.current_interval;
    let mut revision_number: u32 = 0;
    let mut last = first;
    for record in &*records {
        max_interval = max_interval.max(record.current_interval);
        revision_number = revision_number.saturating_add(1);
        last = record;
    }

    let score = get_page_score(last.word_mistakes, last.line_mistakes);
    let scheduled_interval = last.current_interval;
    let scheduled_due_date = last
        .date
        .checked_add_days(Days::new(u64::from(scheduled_interval)))
        .ok_or(SrsError::DateOutOfRange {
            date: last.date,
            days: scheduled_interval,
        })?;

    tracing::debug!(
        page,
        revision_number,
        max_interval,
        %scheduled_due_date,
        "Summarized page history"
    );

    Ok(PageSummary {
        revision_number,
        revision_date: last.date,
        score: Some(score),
        current_interval: Some(last.current_interval),
        interval_delta: Some(score.interval_delta()),
        max_interval: Some(max_interval),
        scheduled_interval,
        scheduled_due_date: Some(scheduled_due_date),
    })
}

fn chronological(page: PageId, records: &[RevisionRecord]) -> Cow<'_, [RevisionRecord]> {
    if records.windows(2).all(|w| w[0].date <= w[1].date) {
        return Cow::Borrowed(records);
    }

    tracing::debug!(page, count = records.len(), "Revision history out of order, sorting");
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|r| r.date);
    Cow::Owned(sorted)
}

/// Summarize every page of a grouped history.
///
/// Pages are independent of each other. The first page that fails aborts the
/// whole computation, since a broken history points at a data problem
/// upstream.
pub fn summarize_all<I, R>(
    grouped: I,
    today: NaiveDate,
) -> Result<BTreeMap<PageId, PageSummary>, SrsError>
where
    I: IntoIterator<Item = (PageId, R)>,
    R: AsRef<[RevisionRecord]>,
{
    grouped
        .into_iter()
        .map(|(page, records)| {
            summarize_page(page, records.as_ref(), today).map(|summary| (page, summary))
        })
        .collect()
}

/// Keep only the pages due on `today` or earlier.
pub fn due_pages(
    summaries: &BTreeMap<PageId, PageSummary>,
    today: NaiveDate,
) -> BTreeMap<PageId, PageSummary> {
    summaries
        .iter()
        .filter(|(_, summary)| summary.is_due(today))
        .map(|(page, summary)| (*page, *summary))
        .collect()
}
