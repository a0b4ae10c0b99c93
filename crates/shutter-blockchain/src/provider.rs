use std::{num::NonZeroUsize, sync::Arc};

use alloy::{
    network::Ethereum,
    providers::{DynProvider, Provider, ProviderBuilder, WsConnect},
    rpc::client::RpcClient,
    transports::{
        BoxTransport, IntoBoxTransport,
        http::{Http, reqwest::Url},
        layers::FallbackLayer,
    },
};
use tower::ServiceBuilder;

use crate::error::BlockchainError;

/// Use Arc<DynProvider> for thread-safe sharing.
pub type BlockchainProvider = Arc<DynProvider<Ethereum>>;

/// Creates a read-only provider over the given RPC endpoints.
/// Supports both HTTP and WebSocket endpoints with automatic failover.
pub async fn initialize_provider(
    rpc_endpoints: &[String],
) -> Result<BlockchainProvider, BlockchainError> {
    let mut transports: Vec<BoxTransport> = Vec::new();
    let mut valid_endpoints = Vec::new();

    for endpoint in rpc_endpoints {
        if endpoint.starts_with("ws://") || endpoint.starts_with("wss://") {
            let ws_connect = WsConnect::new(endpoint);
            match RpcClient::connect_pubsub(ws_connect).await {
                Ok(client) => {
                    transports.push(client.transport().clone().into_box_transport());
                    valid_endpoints.push(endpoint.clone());
                    tracing::debug!(endpoint = %endpoint, "WebSocket RPC endpoint added");
                }
                Err(e) => {
                    tracing::warn!(endpoint = %endpoint, error = %e, "Failed to connect to WebSocket RPC");
                }
            }
        } else {
            match endpoint.parse::<Url>() {
                Ok(url) => {
                    transports.push(Http::new(url).into_box_transport());
                    valid_endpoints.push(endpoint.clone());
                    tracing::debug!(endpoint = %endpoint, "HTTP RPC endpoint added");
                }
                Err(e) => {
                    tracing::warn!(endpoint = %endpoint, error = %e, "Invalid RPC URL");
                }
            }
        }
    }

    if transports.is_empty() {
        return Err(BlockchainError::RpcConnectionFailed {
            attempts: rpc_endpoints.len(),
        });
    }

    // One transport at a time; the next one is only tried on failure.
    let fallback_layer = FallbackLayer::default().with_active_transport_count(NonZeroUsize::MIN);
    let transport = ServiceBuilder::new()
        .layer(fallback_layer)
        .service(transports);
    let client = RpcClient::builder().transport(transport, false);
    let provider = ProviderBuilder::new().connect_client(client);

    match provider.get_block_number().await {
        Ok(block) => {
            tracing::info!(
                endpoints = valid_endpoints.len(),
                block,
                "Blockchain provider initialized"
            );
            Ok(Arc::new(provider.erased()))
        }
        Err(e) => {
            tracing::error!(error = %e, "All RPC endpoints failed connectivity check");
            Err(BlockchainError::RpcConnectionFailed {
                attempts: valid_endpoints.len(),
            })
        }
    }
}
