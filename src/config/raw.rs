use serde::{Deserialize, Serialize};
use shutter_blockchain::{BlockchainConfig, BlockchainConfigRaw};
use shutter_repository::{RepositoryManagerConfig, RepositoryManagerConfigRaw};

use crate::{
    config::ConfigError,
    logger::{LoggerConfig, TelemetryConfig},
};

/// Identity of this node within the network.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct NodeConfig {
    /// Deployment instance; inbound messages for other instances are rejected.
    pub instance_id: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigRaw {
    pub environment: String,
    pub node: NodeConfig,
    pub logger: LoggerConfig,
    pub telemetry: TelemetryConfig,
    pub repository: RepositoryManagerConfigRaw,
    pub blockchain: BlockchainConfigRaw,
}

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub node: NodeConfig,
    pub logger: LoggerConfig,
    pub telemetry: TelemetryConfig,
    pub repository: RepositoryManagerConfig,
    pub blockchain: BlockchainConfig,
}

impl ConfigRaw {
    pub(crate) fn resolve(self) -> Result<Config, ConfigError> {
        Ok(Config {
            node: self.node,
            logger: self.logger,
            telemetry: self.telemetry,
            repository: self.repository.resolve()?,
            blockchain: self.blockchain.resolve()?,
        })
    }
}
