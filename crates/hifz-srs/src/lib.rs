//! SRS (Spaced Repetition System) library for Hifz review tracking
//!
//! This crate turns a student's recorded page revisions into a schedule:
//! mistake counts are classified into a [`Score`], each score moves the review
//! interval by a fixed number of days, and a page's revision history is folded
//! into a [`PageSummary`] that tells the caller when the page is due again.
//!
//! Everything here is pure and synchronous. Loading and storing revisions is
//! left to the caller.

pub mod error;
pub mod next;
pub mod score;
pub mod summary;

pub use error::SrsError;
pub use next::{
    MAX_INTERVAL_DAYS, MIN_INTERVAL_DAYS, NextRevision, next_interval, plan_next_revision,
};
pub use score::{
    Breakpoint, INTERVAL_DELTAS, LINE_MISTAKE_BREAKPOINTS, MistakeCounts, Score,
    WORD_MISTAKE_BREAKPOINTS, get_page_score,
};
pub use summary::{PageId, PageSummary, RevisionRecord, due_pages, summarize_all, summarize_page};
