pub mod catalog;
pub mod dedup;
pub mod engine;
pub mod timing;

use crate::problems::model::FeedKind;
use thiserror::Error;

/// Why a record was skipped during a pass.
///
/// Neither is fatal. The warning is recorded and the remaining records are processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordWarning {
    #[error("{feed} record #{index} refers to unknown {reference}")]
    LookupMiss {
        feed: FeedKind,
        index: usize,
        reference: String,
    },
    #[error("{feed} record #{index} is malformed: {reason}")]
    MalformedRecord {
        feed: FeedKind,
        index: usize,
        reason: String,
    },
}
