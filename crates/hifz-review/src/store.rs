//! Access to stored revisions.
//!
//! The workflow only needs three operations from whatever keeps the
//! revisions: list a student's rows, list one page's rows in date order, and
//! append a row. [`InMemoryRevisionStore`] backs the CLI and the tests.

use std::{
    fs::{self, File},
    io::{BufWriter, Read, Write},
    path::Path,
};

use chrono::NaiveDate;
use hifz_srs::{PageId, RevisionRecord};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ReviewError;

/// A stored revision of one page by one student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRow {
    pub student_id: Uuid,
    pub page: PageId,
    pub date: NaiveDate,
    pub word_mistakes: u32,
    pub line_mistakes: u32,
    /// Interval in days confirmed when the revision was recorded
    pub current_interval: u32,
}

impl RevisionRow {
    pub const fn record(&self) -> RevisionRecord {
        RevisionRecord {
            date: self.date,
            word_mistakes: self.word_mistakes,
            line_mistakes: self.line_mistakes,
            current_interval: self.current_interval,
        }
    }
}

pub trait RevisionStore: Send + Sync {
    /// Every revision of `student_id`, in no particular order.
    fn revisions_for_student(
        &self,
        student_id: Uuid,
    ) -> impl Future<Output = Result<Vec<RevisionRow>, ReviewError>> + Send;

    /// Revisions of one page, oldest first.
    fn revisions_for_page(
        &self,
        student_id: Uuid,
        page: PageId,
    ) -> impl Future<Output = Result<Vec<RevisionRow>, ReviewError>> + Send;

    /// Record a new revision. Rows are never modified once stored.
    fn append_revision(
        &self,
        row: RevisionRow,
    ) -> impl Future<Output = Result<(), ReviewError>> + Send;
}

#[derive(Debug, Default)]
pub struct InMemoryRevisionStore {
    rows: RwLock<Vec<RevisionRow>>,
}

impl InMemoryRevisionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<RevisionRow>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    /// Load rows from a JSON array, e.g. an export of the revisions table.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, ReviewError> {
        let rows: Vec<RevisionRow> = serde_json::from_reader(reader)?;
        tracing::debug!(count = rows.len(), "Loaded revision rows");
        Ok(Self::with_rows(rows))
    }

    /// Snapshot of every stored row, in insertion order.
    pub async fn rows(&self) -> Vec<RevisionRow> {
        self.rows.read().await.clone()
    }

    /// Write every row to `path` as a JSON array.
    ///
    /// The rows go to a sibling temporary file first, which then replaces
    /// `path`, so a failed write leaves the previous file untouched.
    pub async fn save_json_file(&self, path: &Path) -> Result<(), ReviewError> {
        let rows = self.rows().await;
        let tmp_path = path.with_extension("json.tmp");

        let written = write_rows(&tmp_path, &rows).and_then(|()| fs::rename(&tmp_path, path));
        if let Err(err) = written {
            // Best effort, the original error is what matters
            let _ = fs::remove_file(&tmp_path);
            return Err(err.into());
        }

        tracing::debug!(count = rows.len(), path = %path.display(), "Saved revision rows");
        Ok(())
    }
}

fn write_rows(path: &Path, rows: &[RevisionRow]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writer.flush()?;
    writer.get_ref().sync_all()
}

impl RevisionStore for InMemoryRevisionStore {
    async fn revisions_for_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<RevisionRow>, ReviewError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|row| row.student_id == student_id)
            .copied()
            .collect())
    }

    async fn revisions_for_page(
        &self,
        student_id: Uuid,
        page: PageId,
    ) -> Result<Vec<RevisionRow>, ReviewError> {
        let rows = self.rows.read().await;
        let mut page_rows: Vec<_> = rows
            .iter()
            .filter(|row| row.student_id == student_id && row.page == page)
            .copied()
            .collect();
        page_rows.sort_by_key(|row| row.date);
        Ok(page_rows)
    }

    async fn append_revision(&self, row: RevisionRow) -> Result<(), ReviewError> {
        self.rows.write().await.push(row);
        Ok(())
    }
}
