use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SrsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Due date out of range: {date} + {days} days")]
    DateOutOfRange { date: NaiveDate, days: u32 },
}
