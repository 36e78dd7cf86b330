//! Review workflow: which pages are due, what a page looks like before a new
//! revision is entered, and recording that revision.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use hifz_srs::{NextRevision, PageId, PageSummary, RevisionRecord, plan_next_revision};
use metrics::counter;
use uuid::Uuid;

use crate::{
    error::ReviewError,
    store::{RevisionRow, RevisionStore},
    validation::{IntervalEntry, RevisionEntry},
};

#[derive(Debug)]
pub struct ReviewService<S> {
    store: S,
}

impl<S: RevisionStore> ReviewService<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Summary of every page the student has revised at least once.
    pub async fn page_summaries(
        &self,
        student_id: Uuid,
        today: NaiveDate,
    ) -> Result<BTreeMap<PageId, PageSummary>, ReviewError> {
        let rows = self.store.revisions_for_student(student_id).await?;
        let summaries = hifz_srs::summarize_all(group_by_page(rows), today)?;
        Ok(summaries)
    }

    /// Pages due on `today` or earlier.
    pub async fn due_pages(
        &self,
        student_id: Uuid,
        today: NaiveDate,
    ) -> Result<BTreeMap<PageId, PageSummary>, ReviewError> {
        let summaries = self.page_summaries(student_id, today).await?;
        let due = hifz_srs::due_pages(&summaries, today);

        counter!("due_lists_computed_total").increment(1);
        tracing::debug!(
            %student_id,
            pages = summaries.len(),
            due = due.len(),
            "Computed due pages"
        );

        Ok(due)
    }

    /// Current state of one page; the synthetic first-revision summary when
    /// the page has never been revised.
    pub async fn page_entry(
        &self,
        student_id: Uuid,
        page: PageId,
        today: NaiveDate,
    ) -> Result<PageSummary, ReviewError> {
        let records: Vec<RevisionRecord> = self
            .store
            .revisions_for_page(student_id, page)
            .await?
            .iter()
            .map(RevisionRow::record)
            .collect();

        Ok(hifz_srs::summarize_page(page, &records, today)?)
    }

    /// Suggest the interval for a revision entered today.
    pub async fn propose_revision(
        &self,
        student_id: Uuid,
        page: PageId,
        entry: RevisionEntry,
        today: NaiveDate,
    ) -> Result<NextRevision, ReviewError> {
        let counts = entry.counts().inspect_err(|e| {
            tracing::warn!(%student_id, page, "Rejected revision entry: {e}");
        })?;
        let summary = self.page_entry(student_id, page, today).await?;

        Ok(plan_next_revision(
            &summary,
            counts.word_mistakes,
            counts.line_mistakes,
            today,
        )?)
    }

    /// Record a revision with the interval the reviewer confirmed.
    pub async fn submit_revision(
        &self,
        student_id: Uuid,
        page: PageId,
        entry: RevisionEntry,
        interval: IntervalEntry,
        today: NaiveDate,
    ) -> Result<RevisionRow, ReviewError> {
        let counts = entry.counts().inspect_err(|e| {
            tracing::warn!(%student_id, page, "Rejected revision entry: {e}");
        })?;
        let current_interval = interval.days().inspect_err(|e| {
            tracing::warn!(%student_id, page, "Rejected interval: {e}");
        })?;

        let row = RevisionRow {
            student_id,
            page,
            date: today,
            word_mistakes: counts.word_mistakes,
            line_mistakes: counts.line_mistakes,
            current_interval,
        };
        self.store.append_revision(row).await?;

        counter!("revisions_submitted_total").increment(1);
        tracing::info!(
            %student_id,
            page,
            word_mistakes = row.word_mistakes,
            line_mistakes = row.line_mistakes,
            current_interval,
            "Recorded revision"
        );

        Ok(row)
    }
}

/// Group rows by page, each page's records in ascending date order.
fn group_by_page(mut rows: Vec<RevisionRow>) -> BTreeMap<PageId, Vec<RevisionRecord>> {
    rows.sort_by_key(|row| row.date);

    let mut grouped: BTreeMap<PageId, Vec<RevisionRecord>> = BTreeMap::new();
    for row in &rows {
        grouped.entry(row.page).or_default().push(row.record());
    }
    grouped
}
