use shutter_blockchain::BlockchainError;
use shutter_repository::RepositoryError;
use thiserror::Error;

/// Failure while applying a chain event. Every variant aborts the event's
/// transaction and stops the pipeline; the event is retried from the last
/// committed cursor on restart.
#[derive(Error, Debug)]
pub(crate) enum SyncError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Blockchain error: {0}")]
    Blockchain(#[from] BlockchainError),

    #[error("Activation block {0} exceeds the signed 64-bit range")]
    ActivationBlockOverflow(u64),

    #[error("Threshold {0} exceeds the signed 32-bit range")]
    ThresholdOverflow(u64),

    #[error("Set of {0} members exceeds the signed 32-bit index range")]
    MemberIndexOverflow(usize),

    #[error("Cursor cannot advance past block {block_number}, log {log_index}")]
    CursorOverflow { block_number: u64, log_index: u64 },

    #[error("Failed to commit event transaction: {0}")]
    Commit(#[source] RepositoryError),
}
