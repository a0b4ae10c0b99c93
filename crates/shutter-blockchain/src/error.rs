use std::time::Duration;

use alloy::{
    contract::Error as ContractError,
    primitives::Address,
    transports::{RpcError, TransportErrorKind},
};

#[derive(Debug, thiserror::Error)]
pub enum BlockchainError {
    #[error("Contract call {contract}::{function} failed")]
    Contract {
        contract: &'static str,
        function: &'static str,
        #[source]
        source: ContractError,
    },

    #[error("RPC connection failed after trying {attempts} endpoint(s)")]
    RpcConnectionFailed { attempts: usize },

    #[error("Failed to get logs: {reason}")]
    GetLogs {
        reason: String,
        #[source]
        source: Option<RpcError<TransportErrorKind>>,
    },

    #[error("Failed to get block number: {reason}")]
    GetBlockNumber {
        reason: String,
        #[source]
        source: Option<RpcError<TransportErrorKind>>,
    },

    #[error("Failed to decode event from {contract} in block {block_number}: {reason}")]
    DecodeEvent {
        contract: Address,
        block_number: u64,
        reason: String,
    },

    #[error("Log from {contract} is missing {field}")]
    IncompleteLog {
        contract: Address,
        field: &'static str,
    },

    #[error("{operation} timed out after {timeout:?}")]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },

    #[error("Event channel closed")]
    ChannelClosed,

    #[error("Cancelled")]
    Cancelled,
}

impl BlockchainError {
    pub(crate) fn get_logs(source: RpcError<TransportErrorKind>) -> Self {
        Self::GetLogs {
            reason: source.to_string(),
            source: Some(source),
        }
    }

    pub(crate) fn get_block_number(source: RpcError<TransportErrorKind>) -> Self {
        Self::GetBlockNumber {
            reason: source.to_string(),
            source: Some(source),
        }
    }
}
