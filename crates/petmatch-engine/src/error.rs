//! Error types for engine operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A requested window whose start does not strictly precede its end.
    /// Zero-duration windows are invalid input, not "not covered".
    #[error("requested window must start before it ends ({start} >= {end})")]
    EmptyWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("select at least one pet")]
    NoPetsSelected,

    #[error("select a service type")]
    MissingServiceType,

    #[error("choose a sitter")]
    MissingSitter,

    #[error("choose a start and end time")]
    MissingWindow,

    #[error("a price quote is required")]
    MissingPriceQuote,

    #[error("price quote must be positive (got {0})")]
    NonPositivePriceQuote(f64),

    /// The draft is in `Review`; the only way forward is a submission.
    #[error("draft is ready to submit; there is no further step to advance to")]
    AwaitingSubmission,

    /// The draft already produced a booking and accepts no further edits.
    #[error("booking draft was already submitted")]
    AlreadySubmitted,

    /// A review-only operation was attempted before the draft reached `Review`.
    #[error("booking draft is not in the review step")]
    NotInReview,
}

/// Convenience alias used throughout petmatch-engine.
pub type Result<T> = std::result::Result<T, EngineError>;
