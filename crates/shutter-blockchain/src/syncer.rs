use std::time::{Duration, Instant};

use alloy::{
    providers::Provider,
    rpc::types::{Filter, Log},
};
use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;

use crate::{
    config::BlockchainConfig,
    contract_events::{MonitoredContracts, decode_chain_event},
    error::BlockchainError,
    event_source::{EventSource, EventSyncUpdate, SyncCursor},
    provider::BlockchainProvider,
};

/// Finality-delayed event source backed by `eth_getLogs` polling.
///
/// Logs are delivered in `(block, log index)` order starting at the resume
/// cursor. Every fully delivered block range is followed by one absent update
/// for its last block.
pub struct EventSyncer {
    provider: BlockchainProvider,
    contracts: MonitoredContracts,
    finality_offset: u64,
    poll_interval: Duration,
    max_blocks_per_fetch: u64,
    start: SyncCursor,
    sender: mpsc::Sender<EventSyncUpdate>,
    receiver: Mutex<mpsc::Receiver<EventSyncUpdate>>,
}

impl EventSyncer {
    pub fn new(provider: BlockchainProvider, config: &BlockchainConfig, start: SyncCursor) -> Self {
        let (sender, receiver) = mpsc::channel(config.event_buffer);
        Self {
            provider,
            contracts: config.contracts,
            finality_offset: config.finality_offset,
            poll_interval: config.poll_interval,
            max_blocks_per_fetch: config.max_blocks_per_fetch,
            start,
            sender,
            receiver: Mutex::new(receiver),
        }
    }

    async fn finalized_head(&self) -> Result<Option<u64>, BlockchainError> {
        let head = self
            .provider
            .get_block_number()
            .await
            .map_err(BlockchainError::get_block_number)?;
        let finalized = head.checked_sub(self.finality_offset);
        if let Some(finalized) = finalized {
            shutter_observability::record_blockchain_finalized_head(finalized);
        }
        Ok(finalized)
    }

    async fn fetch_logs(&self, from_block: u64, to_block: u64) -> Result<Vec<Log>, BlockchainError> {
        let filter = Filter::new()
            .address(self.contracts.addresses())
            .event_signature(self.contracts.event_signatures())
            .from_block(from_block)
            .to_block(to_block);

        let started = Instant::now();
        let block_span = to_block - from_block + 1;
        match self.provider.get_logs(&filter).await {
            Ok(logs) => {
                shutter_observability::record_blockchain_event_logs_batch(
                    "ok",
                    started.elapsed(),
                    block_span,
                    logs.len(),
                );
                Ok(logs)
            }
            Err(err) => {
                shutter_observability::record_blockchain_event_logs_batch(
                    "error",
                    started.elapsed(),
                    block_span,
                    0,
                );
                Err(BlockchainError::get_logs(err))
            }
        }
    }

    /// Returns `false` if delivery was interrupted by shutdown.
    async fn deliver(
        &self,
        update: EventSyncUpdate,
        shutdown: &CancellationToken,
    ) -> Result<bool, BlockchainError> {
        tokio::select! {
            _ = shutdown.cancelled() => Ok(false),
            sent = self.sender.send(update) => {
                sent.map_err(|_| BlockchainError::ChannelClosed)?;
                Ok(true)
            }
        }
    }
}

#[async_trait]
impl EventSource for EventSyncer {
    #[tracing::instrument(name = "event_syncer", skip_all, fields(
        from_block = self.start.block_number,
        from_log_index = self.start.log_index,
        finality_offset = self.finality_offset,
    ))]
    async fn run(&self, shutdown: CancellationToken) -> Result<(), BlockchainError> {
        let mut cursor = self.start;

        loop {
            let finalized = tokio::select! {
                _ = shutdown.cancelled() => return Ok(()),
                finalized = self.finalized_head() => finalized?,
            };

            let Some((from_block, to_block)) =
                next_range(cursor, finalized, self.max_blocks_per_fetch)
            else {
                tokio::select! {
                    _ = shutdown.cancelled() => return Ok(()),
                    _ = tokio::time::sleep(self.poll_interval) => {}
                }
                continue;
            };

            let logs = tokio::select! {
                _ = shutdown.cancelled() => return Ok(()),
                logs = self.fetch_logs(from_block, to_block) => logs?,
            };
            let updates = order_updates(&self.contracts, logs, cursor)?;
            tracing::debug!(
                from_block,
                to_block,
                events = updates.len(),
                "Fetched finalized events"
            );

            for update in updates {
                if !self.deliver(update, &shutdown).await? {
                    return Ok(());
                }
            }
            if !self
                .deliver(EventSyncUpdate::absent(to_block), &shutdown)
                .await?
            {
                return Ok(());
            }

            cursor = SyncCursor::new(to_block + 1, 0);
        }
    }

    async fn next(&self, shutdown: &CancellationToken) -> Result<EventSyncUpdate, BlockchainError> {
        let mut receiver = self.receiver.lock().await;
        tokio::select! {
            _ = shutdown.cancelled() => Err(BlockchainError::Cancelled),
            update = receiver.recv() => update.ok_or(BlockchainError::ChannelClosed),
        }
    }
}

/// Block range to fetch next, or `None` when the cursor is past the finalized head.
fn next_range(cursor: SyncCursor, finalized: Option<u64>, max_blocks: u64) -> Option<(u64, u64)> {
    let finalized = finalized?;
    if cursor.block_number > finalized {
        return None;
    }
    let to_block = cursor
        .block_number
        .saturating_add(max_blocks - 1)
        .min(finalized);
    Some((cursor.block_number, to_block))
}

/// Decodes and sorts a fetched batch, dropping logs before `cursor`.
fn order_updates(
    contracts: &MonitoredContracts,
    logs: Vec<Log>,
    cursor: SyncCursor,
) -> Result<Vec<EventSyncUpdate>, BlockchainError> {
    let mut positioned = Vec::with_capacity(logs.len());
    for log in logs {
        if log.removed {
            continue;
        }
        let block_number = log.block_number.ok_or(BlockchainError::IncompleteLog {
            contract: log.address(),
            field: "block number",
        })?;
        let log_index = log.log_index.ok_or(BlockchainError::IncompleteLog {
            contract: log.address(),
            field: "log index",
        })?;
        if SyncCursor::new(block_number, log_index) < cursor {
            continue;
        }
        positioned.push((block_number, log_index, log));
    }
    positioned.sort_by_key(|(block_number, log_index, _)| (*block_number, *log_index));

    positioned
        .into_iter()
        .map(|(block_number, log_index, log)| {
            Ok(EventSyncUpdate {
                event: Some(decode_chain_event(contracts, &log)?),
                block_number,
                log_index,
            })
        })
        .collect()
}
