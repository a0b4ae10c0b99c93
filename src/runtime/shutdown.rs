use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::sync::SyncError;

const SYNC_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

pub(super) struct ShutdownContext {
    pub(super) shutdown: CancellationToken,
    pub(super) sync_task: JoinHandle<Result<(), SyncError>>,
}

pub(super) async fn graceful_shutdown(context: ShutdownContext) -> Result<(), SyncError> {
    // 1. Cancel the sync pipeline. An event transaction still in flight is
    //    rolled back and replayed from the stored cursor on the next start.
    // 2. Wait for the pipeline to exit.
    let ShutdownContext {
        shutdown,
        mut sync_task,
    } = context;

    tracing::info!("Shutting down gracefully...");

    shutdown.cancel();
    let result = wait_for_shutdown_task("chain_sync", SYNC_SHUTDOWN_TIMEOUT, &mut sync_task)
        .await
        .unwrap_or(Ok(()));

    tracing::info!("Shutdown complete");
    result
}

async fn wait_for_shutdown_task<T>(
    task: &str,
    timeout: Duration,
    handle: &mut JoinHandle<T>,
) -> Option<T> {
    match tokio::time::timeout(timeout, &mut *handle).await {
        Ok(Ok(output)) => Some(output),
        Ok(Err(error)) => {
            tracing::error!(task, error = ?error, "Shutdown task panicked");
            None
        }
        Err(_) => {
            tracing::warn!(
                task,
                timeout_secs = timeout.as_secs(),
                "Shutdown timeout reached, aborting task"
            );
            handle.abort();
            let _ = handle.await;
            None
        }
    }
}
