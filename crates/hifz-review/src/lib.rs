pub mod config;
pub mod error;
pub mod service;
pub mod store;
pub mod tracing;
pub mod validation;

pub use config::{Environment, ReviewConfig};
pub use error::ReviewError;
pub use service::ReviewService;
pub use store::{InMemoryRevisionStore, RevisionRow, RevisionStore};
pub use validation::{IntervalEntry, RevisionEntry};
