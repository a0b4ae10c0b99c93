use shutter_blockchain::{BlockchainProvider, initialize_provider};
use shutter_network::MessageRouter;
use shutter_repository::RepositoryManager;

use crate::{
    config::{self, Config},
    error::NodeError,
    handlers,
};

pub(crate) struct CoreBootstrap {
    pub(crate) config: Config,
    pub(crate) repository: RepositoryManager,
    pub(crate) provider: BlockchainProvider,
    pub(crate) message_router: MessageRouter,
}

pub(crate) async fn build_core() -> Result<CoreBootstrap, NodeError> {
    let config = config::initialize_configuration()?;
    crate::logger::initialize(&config.logger, &config.telemetry)?;

    let repository = RepositoryManager::connect(&config.repository).await?;
    tracing::info!(driver = ?config.repository.driver, "Repository ready");

    let provider = initialize_provider(&config.blockchain.rpc_endpoints).await?;

    let message_router =
        handlers::build_message_router(config.node.instance_id, repository.clone());

    Ok(CoreBootstrap {
        config,
        repository,
        provider,
        message_router,
    })
}
