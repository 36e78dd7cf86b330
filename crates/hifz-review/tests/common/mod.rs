use chrono::NaiveDate;
use hifz_review::{
    InMemoryRevisionStore, ReviewError, ReviewService, RevisionRow, RevisionStore,
};
use hifz_srs::PageId;
use uuid::Uuid;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Builder for a student's revision history
pub struct HistoryBuilder {
    pub student_id: Uuid,
    rows: Vec<RevisionRow>,
}

impl HistoryBuilder {
    pub fn new() -> Self {
        Self {
            student_id: Uuid::new_v4(),
            rows: Vec::new(),
        }
    }

    pub fn revision(
        mut self,
        page: PageId,
        date: NaiveDate,
        word_mistakes: u32,
        line_mistakes: u32,
        current_interval: u32,
    ) -> Self {
        self.rows.push(RevisionRow {
            student_id: self.student_id,
            page,
            date,
            word_mistakes,
            line_mistakes,
            current_interval,
        });
        self
    }

    pub fn build(self) -> (Uuid, ReviewService<InMemoryRevisionStore>) {
        let service = ReviewService::new(InMemoryRevisionStore::with_rows(self.rows));
        (self.student_id, service)
    }
}

impl Default for HistoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Store whose backend is unreachable
pub struct UnavailableStore;

impl RevisionStore for UnavailableStore {
    async fn revisions_for_student(&self, _: Uuid) -> Result<Vec<RevisionRow>, ReviewError> {
        Err(ReviewError::Store("connection refused".to_string()))
    }

    async fn revisions_for_page(
        &self,
        _: Uuid,
        _: PageId,
    ) -> Result<Vec<RevisionRow>, ReviewError> {
        Err(ReviewError::Store("connection refused".to_string()))
    }

    async fn append_revision(&self, _: RevisionRow) -> Result<(), ReviewError> {
        Err(ReviewError::Store("connection refused".to_string()))
    }
}
