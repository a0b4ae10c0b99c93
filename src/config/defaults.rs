//! Typed default configurations for each environment.
//!
//! Each environment (development, testnet, mainnet) gets a fully constructed
//! [`ConfigRaw`] via [`config_for`]. Shared defaults are factored into helper
//! functions so it is easy to see what differs between environments.
//!
//! Contract addresses and RPC endpoints for testnet and mainnet are deployment
//! specific and left empty; they must come from `config.toml`, `--config` or
//! `SHUTTER_BLOCKCHAIN__*` variables.

use std::net::SocketAddr;

use shutter_blockchain::BlockchainConfigRaw;
use shutter_repository::{DatabaseDriver, RepositoryManagerConfigRaw};

use super::{ConfigError, ConfigRaw, NodeConfig};
use crate::logger::{LogFormat, LoggerConfig, TelemetryConfig, TelemetryMetricsConfig};

/// Returns the default [`ConfigRaw`] for the given environment name.
pub(crate) fn config_for(environment: &str) -> Result<ConfigRaw, ConfigError> {
    match environment {
        "development" => Ok(development()),
        "testnet" => Ok(testnet()),
        "mainnet" => Ok(mainnet()),
        _ => Err(ConfigError::UnknownEnvironment(environment.to_string())),
    }
}

// ── Shared defaults (identical across all environments) ─────────

const FINALITY_OFFSET: u64 = 3;

fn telemetry(enabled: bool) -> TelemetryConfig {
    TelemetryConfig {
        metrics: TelemetryMetricsConfig {
            enabled,
            bind_address: SocketAddr::from(([0, 0, 0, 0], 9464)),
        },
    }
}

fn postgres_repository() -> RepositoryManagerConfigRaw {
    RepositoryManagerConfigRaw {
        driver: DatabaseDriver::Postgres,
        user: "shutter".to_string(),
        password: None,
        database: "shutter".to_string(),
        host: "localhost".to_string(),
        port: 5432,
        max_connections: 16,
        min_connections: 2,
    }
}

fn remote_blockchain() -> BlockchainConfigRaw {
    BlockchainConfigRaw {
        rpc_endpoints: Vec::new(),
        keypers_config_list_address: String::new(),
        decryptors_config_list_address: String::new(),
        keypers_address: String::new(),
        decryptors_address: String::new(),
        bls_public_key_registry_address: String::new(),
        bls_signature_registry_address: String::new(),
        finality_offset: FINALITY_OFFSET,
        poll_interval_ms: 5_000,
        max_blocks_per_fetch: 1_000,
        event_buffer: 64,
        contract_call_timeout_ms: 15_000,
    }
}

// ── Per-environment configurations ──────────────────────────────

fn development() -> ConfigRaw {
    ConfigRaw {
        environment: "development".to_string(),
        node: NodeConfig { instance_id: 0 },
        logger: LoggerConfig {
            level: "rust_shutter_node=debug,shutter_blockchain=debug,shutter_repository=info"
                .to_string(),
            format: LogFormat::Pretty,
        },
        telemetry: telemetry(false),
        repository: RepositoryManagerConfigRaw {
            driver: DatabaseDriver::Sqlite,
            user: String::new(),
            password: None,
            database: "shutter-node.sqlite".to_string(),
            host: String::new(),
            port: 0,
            max_connections: 1,
            min_connections: 1,
        },
        // Deterministic deployment addresses of a fresh local anvil/hardhat chain.
        blockchain: BlockchainConfigRaw {
            rpc_endpoints: vec!["http://localhost:8545".to_string()],
            keypers_config_list_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3"
                .to_string(),
            decryptors_config_list_address: "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512"
                .to_string(),
            keypers_address: "0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0".to_string(),
            decryptors_address: "0xCf7Ed3AccA5a467e9e704C703E8D87F634fB0Fc9".to_string(),
            bls_public_key_registry_address: "0xDc64a140Aa3E981100a9becA4E685f962f0cF6C9"
                .to_string(),
            bls_signature_registry_address: "0x5FC8d32690cc91D4c39d9d3abcBD16989F875707"
                .to_string(),
            finality_offset: 0,
            poll_interval_ms: 1_000,
            max_blocks_per_fetch: 100,
            event_buffer: 16,
            contract_call_timeout_ms: 5_000,
        },
    }
}

fn testnet() -> ConfigRaw {
    ConfigRaw {
        environment: "testnet".to_string(),
        node: NodeConfig { instance_id: 0 },
        logger: LoggerConfig {
            level: "rust_shutter_node=info,shutter_blockchain=info".to_string(),
            format: LogFormat::Pretty,
        },
        telemetry: telemetry(false),
        repository: postgres_repository(),
        blockchain: remote_blockchain(),
    }
}

fn mainnet() -> ConfigRaw {
    ConfigRaw {
        environment: "mainnet".to_string(),
        node: NodeConfig { instance_id: 0 },
        logger: LoggerConfig {
            level: "rust_shutter_node=info,shutter_blockchain=info".to_string(),
            format: LogFormat::Json,
        },
        telemetry: telemetry(true),
        repository: postgres_repository(),
        blockchain: remote_blockchain(),
    }
}
