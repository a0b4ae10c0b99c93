use alloy::{
    primitives::{Address, B256, Bytes},
    rpc::types::Log,
    sol_types::{SolEvent, SolEventInterface},
};

use crate::{
    contracts::{DecryptorsConfigsList, KeypersConfigsList, Registry},
    error::BlockchainError,
};

/// Contracts whose events drive the local view of chain configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitoredContracts {
    pub keypers_config_list: Address,
    pub decryptors_config_list: Address,
    pub bls_public_key_registry: Address,
    pub bls_signature_registry: Address,
}

impl MonitoredContracts {
    pub fn addresses(&self) -> Vec<Address> {
        vec![
            self.keypers_config_list,
            self.decryptors_config_list,
            self.bls_public_key_registry,
            self.bls_signature_registry,
        ]
    }

    pub fn event_signatures(&self) -> Vec<B256> {
        vec![
            KeypersConfigsList::NewConfig::SIGNATURE_HASH,
            DecryptorsConfigsList::NewConfig::SIGNATURE_HASH,
            Registry::Registered::SIGNATURE_HASH,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewKeyperConfig {
    pub activation_block_number: u64,
    pub index: u64,
    pub threshold: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDecryptorConfig {
    pub activation_block_number: u64,
    pub index: u64,
}

/// A `Registered` event. Public keys and signatures share the event shape and
/// are told apart by the emitting registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub registry: Address,
    pub account: Address,
    pub data: Bytes,
}

/// Chain events the synchronizer understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainEvent {
    KeypersConfigsListNewConfig(NewKeyperConfig),
    DecryptorsConfigsListNewConfig(NewDecryptorConfig),
    Registered(Registration),
    /// A log that matched the filter but belongs to none of the kinds above.
    Unknown { contract: Address, topic0: Option<B256> },
}

impl ChainEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            ChainEvent::KeypersConfigsListNewConfig(_) => "keypers_config",
            ChainEvent::DecryptorsConfigsListNewConfig(_) => "decryptors_config",
            ChainEvent::Registered(_) => "registered",
            ChainEvent::Unknown { .. } => "unknown",
        }
    }
}

fn decode_event<E: SolEventInterface>(log: &Log) -> Result<E, String> {
    E::decode_log(log.as_ref())
        .map(|decoded| decoded.data)
        .map_err(|err| err.to_string())
}

/// Decodes a log fetched for `contracts`.
///
/// A log whose topic names a known event but whose payload does not decode is an
/// error: it means the configured addresses do not point at the expected contracts.
pub fn decode_chain_event(
    contracts: &MonitoredContracts,
    log: &Log,
) -> Result<ChainEvent, BlockchainError> {
    let contract = log.address();
    let topic0 = log.topic0().copied();
    let decode_error = |reason: String| BlockchainError::DecodeEvent {
        contract,
        block_number: log.block_number.unwrap_or_default(),
        reason,
    };

    let event = if contract == contracts.keypers_config_list
        && topic0 == Some(KeypersConfigsList::NewConfig::SIGNATURE_HASH)
    {
        match decode_event::<KeypersConfigsList::KeypersConfigsListEvents>(log)
            .map_err(decode_error)?
        {
            KeypersConfigsList::KeypersConfigsListEvents::NewConfig(event) => {
                ChainEvent::KeypersConfigsListNewConfig(NewKeyperConfig {
                    activation_block_number: event.activationBlockNumber,
                    index: event.index,
                    threshold: event.threshold,
                })
            }
        }
    } else if contract == contracts.decryptors_config_list
        && topic0 == Some(DecryptorsConfigsList::NewConfig::SIGNATURE_HASH)
    {
        match decode_event::<DecryptorsConfigsList::DecryptorsConfigsListEvents>(log)
            .map_err(decode_error)?
        {
            DecryptorsConfigsList::DecryptorsConfigsListEvents::NewConfig(event) => {
                ChainEvent::DecryptorsConfigsListNewConfig(NewDecryptorConfig {
                    activation_block_number: event.activationBlockNumber,
                    index: event.index,
                })
            }
        }
    } else if topic0 == Some(Registry::Registered::SIGNATURE_HASH) {
        match decode_event::<Registry::RegistryEvents>(log).map_err(decode_error)? {
            Registry::RegistryEvents::Registered(event) => ChainEvent::Registered(Registration {
                registry: contract,
                account: event.a,
                data: event.data,
            }),
        }
    } else {
        ChainEvent::Unknown { contract, topic0 }
    };

    Ok(event)
}

#[cfg(test)]
pub(crate) mod tests {
    #![allow(clippy::unwrap_used)]

    use alloy::primitives::LogData;

    use super::*;

    pub(crate) fn contracts() -> MonitoredContracts {
        MonitoredContracts {
            keypers_config_list: Address::with_last_byte(1),
            decryptors_config_list: Address::with_last_byte(2),
            bls_public_key_registry: Address::with_last_byte(5),
            bls_signature_registry: Address::with_last_byte(6),
        }
    }

    pub(crate) fn log(address: Address, data: LogData, block_number: u64, log_index: u64) -> Log {
        Log {
            inner: alloy::primitives::Log { address, data },
            block_number: Some(block_number),
            log_index: Some(log_index),
            ..Default::default()
        }
    }

    pub(crate) fn keyper_config_log(block_number: u64, log_index: u64) -> Log {
        let event = KeypersConfigsList::NewConfig {
            activationBlockNumber: 120,
            index: 4,
            threshold: 2,
        };
        log(
            Address::with_last_byte(1),
            event.encode_log_data(),
            block_number,
            log_index,
        )
    }

    #[test]
    fn decodes_keyper_config() {
        let event = decode_chain_event(&contracts(), &keyper_config_log(10, 0)).unwrap();
        assert_eq!(
            event,
            ChainEvent::KeypersConfigsListNewConfig(NewKeyperConfig {
                activation_block_number: 120,
                index: 4,
                threshold: 2,
            })
        );
    }

    #[test]
    fn registered_event_carries_emitting_registry() {
        let event = Registry::Registered {
            a: Address::with_last_byte(0xaa),
            data: Bytes::from_static(&[1, 2, 3]),
        };
        let log = log(Address::with_last_byte(6), event.encode_log_data(), 11, 2);

        let decoded = decode_chain_event(&contracts(), &log).unwrap();
        assert_eq!(
            decoded,
            ChainEvent::Registered(Registration {
                registry: Address::with_last_byte(6),
                account: Address::with_last_byte(0xaa),
                data: Bytes::from_static(&[1, 2, 3]),
            })
        );
    }

    #[test]
    fn keyper_event_from_other_contract_is_unknown() {
        let mut log = keyper_config_log(10, 0);
        log.inner.address = Address::with_last_byte(9);

        let decoded = decode_chain_event(&contracts(), &log).unwrap();
        assert!(matches!(decoded, ChainEvent::Unknown { .. }));
    }

    #[test]
    fn truncated_payload_is_an_error() {
        let mut log = keyper_config_log(10, 0);
        let topics = log.inner.data.topics().to_vec();
        log.inner.data = LogData::new_unchecked(topics, Bytes::from_static(&[0; 8]));

        assert!(matches!(
            decode_chain_event(&contracts(), &log),
            Err(BlockchainError::DecodeEvent { .. })
        ));
    }
}
