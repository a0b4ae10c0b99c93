use tokio::{select, signal::unix::SignalKind};
use tokio_util::sync::CancellationToken;

use super::shutdown;
use crate::{bootstrap::CoreBootstrap, error::NodeError, sync};

pub(crate) async fn run(core: CoreBootstrap) -> Result<(), NodeError> {
    let CoreBootstrap {
        config,
        repository,
        provider,
        message_router,
    } = core;

    tracing::info!(
        instance_id = config.node.instance_id,
        topics = ?message_router.topics(),
        "Message handlers registered"
    );

    let shutdown = CancellationToken::new();
    let sync_shutdown = shutdown.clone();
    let blockchain_config = config.blockchain;
    let mut sync_task = tokio::task::spawn(async move {
        sync::run_sync_pipeline(repository, provider, &blockchain_config, sync_shutdown).await
    });

    // Wait for shutdown signal (SIGINT or SIGTERM), or for the pipeline to stop on its own
    let ctrl_c = tokio::signal::ctrl_c();
    let mut sigterm = tokio::signal::unix::signal(SignalKind::terminate())?;

    select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, initiating shutdown..."),
        _ = sigterm.recv() => tracing::info!("Received SIGTERM, initiating shutdown..."),
        joined = &mut sync_task => {
            let result = joined?;
            if let Err(error) = &result {
                tracing::error!(error = %error, "Chain synchronization stopped");
            }
            return result.map_err(NodeError::from);
        }
    }

    shutdown::graceful_shutdown(shutdown::ShutdownContext {
        shutdown,
        sync_task,
    })
    .await?;

    Ok(())
}
