use jobsync_core::NormalizeError;
use jobsync_db::StoreError;
use thiserror::Error;

/// Why a tagging pass stopped early. Writes made before the failure stay.
#[derive(Debug, Error)]
pub enum TaggingError {
    #[error(transparent)]
    Encoding(#[from] NormalizeError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure reconciling a single candidate. The run driver logs it and moves
/// on to the next candidate.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("invalid candidate from {source_name}: {reason}")]
    InvalidCandidate { source_name: String, reason: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}
