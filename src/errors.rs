use thiserror::Error;
use warp::reject;

use crate::record::RecordId;

/// Enumerates high-level errors returned by this library.
#[derive(Debug, Error)]
pub enum DeskError {
    /// Represents a lookup by an ID that matches nothing.
    #[error("No record with ID {id} in {collection}")]
    NotFound {
        collection: &'static str,
        id: RecordId,
    },

    /// Represents an attempt to insert a record under an ID that is
    /// already taken.
    #[error("ID {0} already exists")]
    DuplicateId(RecordId),

    /// Represents a submission missing a required field.
    #[error("Missing required field {0}")]
    MissingField(&'static str),

    /// Represents a date range with only one of its bounds.
    #[error("Date range needs both `from` and `to`")]
    IncompleteDateRange,

    /// Represents a date that isn’t written as `YYYY-MM-DD`.
    #[error("Invalid date")]
    InvalidDate { source: time::error::Parse },

    /// Represents a failure to build the URL of a record.
    #[error("Invalid URL")]
    InvalidUrl { source: url::ParseError },

    /// Represents a lock poisoned by a panic in another thread.
    #[error("Collection lock poisoned")]
    LockPoisoned,
}

impl DeskError {
    pub fn not_found(collection: &'static str, id: &RecordId) -> Self {
        DeskError::NotFound {
            collection,
            id: id.clone(),
        }
    }
}

impl reject::Reject for DeskError {}
