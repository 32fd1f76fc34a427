pub mod api;
pub mod classify;
pub mod link;
pub mod pass;
pub mod problems;

pub use api::{Category, Classification, ClassificationResult, Tag};
pub use classify::{engine::ClassificationEngine, RecordWarning};
pub use link::LinkBuilder;
pub use pass::{PassTicket, PassTracker};
pub use problems::core::{ProblemsApi, ProblemsClient, RetrievalFailure};
