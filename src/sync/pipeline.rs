use std::sync::Arc;

use shutter_blockchain::{
    BlockchainConfig, BlockchainError, BlockchainProvider, ContractAddressSetReader, EventSource,
    EventSyncer, SyncCursor,
};
use shutter_repository::{RepositoryManager, RepositoryScope};
use tokio_util::sync::CancellationToken;

use super::{applier::EventApplier, error::SyncError};

/// Reads the persisted cursor. A missing row means nothing was applied yet.
pub(crate) async fn load_cursor(repository: &RepositoryManager) -> Result<SyncCursor, SyncError> {
    let progress = repository
        .event_sync_progress_repository()
        .get()
        .await?
        .unwrap_or_default();
    Ok(SyncCursor::new(
        progress.next_block_number,
        progress.next_log_index,
    ))
}

/// Runs chain synchronization against the configured contracts until
/// `shutdown` fires or either half of the pipeline fails.
pub(crate) async fn run_sync_pipeline(
    repository: RepositoryManager,
    provider: BlockchainProvider,
    config: &BlockchainConfig,
    shutdown: CancellationToken,
) -> Result<(), SyncError> {
    let start = load_cursor(&repository).await?;
    tracing::info!(
        next_block_number = start.block_number,
        next_log_index = start.log_index,
        finality_offset = config.finality_offset,
        "Starting chain synchronization"
    );

    let source = EventSyncer::new(Arc::clone(&provider), config, start);
    let address_sets = Arc::new(ContractAddressSetReader::new(provider, config));
    let applier = EventApplier::new(repository, address_sets, &config.contracts);

    run_pipeline(&source, &applier, &shutdown).await
}

/// Joins the producing event source and the consuming applier. The first
/// failure cancels the other half and is returned.
pub(crate) async fn run_pipeline(
    source: &dyn EventSource,
    applier: &EventApplier,
    shutdown: &CancellationToken,
) -> Result<(), SyncError> {
    let pipeline = shutdown.child_token();

    let produce = async {
        match source.run(pipeline.clone()).await {
            Ok(()) | Err(BlockchainError::Cancelled) => Ok(()),
            Err(error) => {
                pipeline.cancel();
                Err(SyncError::from(error))
            }
        }
    };

    let consume = async {
        let result = applier.run(source, &pipeline).await;
        if result.is_err() {
            pipeline.cancel();
        }
        result
    };

    tokio::try_join!(produce, consume).map(|_| ())
}
