mod address_set;
mod config;
mod config_error;
mod contract_events;
mod contracts;
mod error;
mod event_source;
mod provider;
mod syncer;

pub use address_set::{AddressSet, AddressSetReader, ContractAddressSetReader};
pub use config::{BlockchainConfig, BlockchainConfigRaw};
pub use config_error::ConfigError;
pub use contract_events::{
    ChainEvent, MonitoredContracts, NewDecryptorConfig, NewKeyperConfig, Registration,
    decode_chain_event,
};
pub use error::BlockchainError;
pub use event_source::{EventSource, EventSyncUpdate, SyncCursor};
pub use provider::{BlockchainProvider, initialize_provider};
pub use syncer::EventSyncer;

pub use alloy::primitives::{Address, Bytes};
