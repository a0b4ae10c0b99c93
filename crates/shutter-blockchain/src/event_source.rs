use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::{contract_events::ChainEvent, error::BlockchainError};

/// Position in the ordered event log: the next `(block, log index)` to deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SyncCursor {
    pub block_number: u64,
    pub log_index: u64,
}

impl SyncCursor {
    pub fn new(block_number: u64, log_index: u64) -> Self {
        Self {
            block_number,
            log_index,
        }
    }
}

/// One item of the finality-delayed event stream.
///
/// `event` is `None` for a tick stating that every event up to and including
/// `block_number` has been delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSyncUpdate {
    pub event: Option<ChainEvent>,
    pub block_number: u64,
    pub log_index: u64,
}

impl EventSyncUpdate {
    pub fn absent(block_number: u64) -> Self {
        Self {
            event: None,
            block_number,
            log_index: 0,
        }
    }

    /// The cursor to persist once this update has been applied.
    ///
    /// After an event the next candidate is the following log in the same block;
    /// after an absent tick the block is exhausted.
    pub fn next_cursor(&self) -> Option<SyncCursor> {
        match self.event {
            Some(_) => Some(SyncCursor::new(
                self.block_number,
                self.log_index.checked_add(1)?,
            )),
            None => Some(SyncCursor::new(self.block_number.checked_add(1)?, 0)),
        }
    }
}

/// Ordered, resumable source of chain events.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Produces updates until cancelled or a fatal error occurs.
    async fn run(&self, shutdown: CancellationToken) -> Result<(), BlockchainError>;

    /// Waits for the next update. Returns [`BlockchainError::Cancelled`] once
    /// `shutdown` fires.
    async fn next(&self, shutdown: &CancellationToken) -> Result<EventSyncUpdate, BlockchainError>;
}
