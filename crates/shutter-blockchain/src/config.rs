use std::time::Duration;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, contract_events::MonitoredContracts};

/// Chain access and the addresses of the contracts the node follows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockchainConfigRaw {
    /// RPC endpoints for EVM JSON-RPC calls (supports HTTP and WebSocket).
    /// Multiple endpoints enable fallback if primary fails.
    #[serde(default)]
    pub rpc_endpoints: Vec<String>,

    pub keypers_config_list_address: String,
    pub decryptors_config_list_address: String,
    /// Address sequence holding the keyper sets referenced by config events.
    pub keypers_address: String,
    /// Address sequence holding the decryptor sets referenced by config events.
    pub decryptors_address: String,
    pub bls_public_key_registry_address: String,
    pub bls_signature_registry_address: String,

    /// Number of confirmations before a block is considered final.
    pub finality_offset: u64,
    /// Delay between head polls once the syncer has caught up.
    pub poll_interval_ms: u64,
    /// Upper bound on the block span of a single `eth_getLogs` request.
    pub max_blocks_per_fetch: u64,
    /// Capacity of the channel between the syncer and the event applier.
    pub event_buffer: usize,
    pub contract_call_timeout_ms: u64,
}

impl BlockchainConfigRaw {
    pub fn resolve(self) -> Result<BlockchainConfig, ConfigError> {
        if self.rpc_endpoints.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "rpc_endpoints must include at least one endpoint".to_string(),
            ));
        }
        if self.max_blocks_per_fetch == 0 {
            return Err(ConfigError::InvalidConfig(
                "max_blocks_per_fetch must be greater than 0".to_string(),
            ));
        }
        if self.event_buffer == 0 {
            return Err(ConfigError::InvalidConfig(
                "event_buffer must be greater than 0".to_string(),
            ));
        }

        let contracts = MonitoredContracts {
            keypers_config_list: parse_address(
                "keypers_config_list_address",
                &self.keypers_config_list_address,
            )?,
            decryptors_config_list: parse_address(
                "decryptors_config_list_address",
                &self.decryptors_config_list_address,
            )?,
            bls_public_key_registry: parse_address(
                "bls_public_key_registry_address",
                &self.bls_public_key_registry_address,
            )?,
            bls_signature_registry: parse_address(
                "bls_signature_registry_address",
                &self.bls_signature_registry_address,
            )?,
        };
        if contracts.bls_public_key_registry == contracts.bls_signature_registry {
            return Err(ConfigError::InvalidConfig(
                "BLS public key and signature registries must be distinct contracts".to_string(),
            ));
        }

        Ok(BlockchainConfig {
            rpc_endpoints: self.rpc_endpoints,
            contracts,
            keypers_address: parse_address("keypers_address", &self.keypers_address)?,
            decryptors_address: parse_address("decryptors_address", &self.decryptors_address)?,
            finality_offset: self.finality_offset,
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            max_blocks_per_fetch: self.max_blocks_per_fetch,
            event_buffer: self.event_buffer,
            contract_call_timeout: Duration::from_millis(self.contract_call_timeout_ms),
        })
    }
}

#[derive(Debug, Clone)]
pub struct BlockchainConfig {
    pub rpc_endpoints: Vec<String>,
    pub contracts: MonitoredContracts,
    pub keypers_address: Address,
    pub decryptors_address: Address,
    pub finality_offset: u64,
    pub poll_interval: Duration,
    pub max_blocks_per_fetch: u64,
    pub event_buffer: usize,
    pub contract_call_timeout: Duration,
}

fn parse_address(field: &'static str, value: &str) -> Result<Address, ConfigError> {
    value
        .parse::<Address>()
        .map_err(|_| ConfigError::InvalidAddress {
            field,
            value: value.to_string(),
        })
}
