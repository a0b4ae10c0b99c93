use std::time::{Duration, Instant};

use alloy::primitives::Address;
use async_trait::async_trait;

use crate::{
    config::BlockchainConfig, contracts::AddrsSeq, error::BlockchainError,
    provider::BlockchainProvider,
};

/// On-chain address sequences referenced by config events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressSet {
    Keypers,
    Decryptors,
}

impl AddressSet {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressSet::Keypers => "keypers",
            AddressSet::Decryptors => "decryptors",
        }
    }
}

#[async_trait]
pub trait AddressSetReader: Send + Sync {
    /// Addresses of the set stored at `index`, read at the latest block.
    async fn get_addresses_at_index(
        &self,
        set: AddressSet,
        index: u64,
    ) -> Result<Vec<Address>, BlockchainError>;
}

/// Reads address sets from the `AddrsSeq` contracts.
pub struct ContractAddressSetReader {
    provider: BlockchainProvider,
    keypers: Address,
    decryptors: Address,
    call_timeout: Duration,
}

impl ContractAddressSetReader {
    pub fn new(provider: BlockchainProvider, config: &BlockchainConfig) -> Self {
        Self {
            provider,
            keypers: config.keypers_address,
            decryptors: config.decryptors_address,
            call_timeout: config.contract_call_timeout,
        }
    }
}

#[async_trait]
impl AddressSetReader for ContractAddressSetReader {
    #[tracing::instrument(skip(self), fields(set = set.as_str()))]
    async fn get_addresses_at_index(
        &self,
        set: AddressSet,
        index: u64,
    ) -> Result<Vec<Address>, BlockchainError> {
        let address = match set {
            AddressSet::Keypers => self.keypers,
            AddressSet::Decryptors => self.decryptors,
        };
        let contract = AddrsSeq::new(address, self.provider.as_ref().clone());

        let started = Instant::now();
        let result = match tokio::time::timeout(self.call_timeout, contract.getAddrs(index).call())
            .await
        {
            Ok(Ok(addresses)) => Ok(addresses),
            Ok(Err(source)) => Err(BlockchainError::Contract {
                contract: "AddrsSeq",
                function: "getAddrs",
                source,
            }),
            Err(_) => Err(BlockchainError::Timeout {
                operation: "AddrsSeq::getAddrs",
                timeout: self.call_timeout,
            }),
        };

        let status = if result.is_ok() { "ok" } else { "error" };
        shutter_observability::record_blockchain_address_set_query(
            set.as_str(),
            status,
            started.elapsed(),
        );
        result
    }
}
