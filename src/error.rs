use thiserror::Error;

use crate::{config::ConfigError, logger::LoggerError, sync::SyncError};

/// Top-level application error that composes all subsystem errors
#[derive(Error, Debug)]
pub(crate) enum NodeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logger error: {0}")]
    Logger(#[from] LoggerError),

    /// Database connection or migration errors
    #[error("Repository error: {0}")]
    Repository(#[from] shutter_repository::RepositoryError),

    /// RPC provider errors
    #[error("Blockchain error: {0}")]
    Blockchain(#[from] shutter_blockchain::BlockchainError),

    /// Chain synchronization stopped on a fatal error
    #[error("Synchronization error: {0}")]
    Sync(#[from] SyncError),

    #[error("Task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
