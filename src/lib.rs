mod bootstrap;
mod config;
mod error;
mod handlers;
mod logger;
mod runtime;
mod sync;

use std::process::ExitCode;

pub async fn run() -> ExitCode {
    // Install rustls crypto provider before any TLS connections
    let _ = rustls::crypto::ring::default_provider().install_default();

    let core = match bootstrap::build_core().await {
        Ok(core) => core,
        Err(error) => {
            tracing::error!(error = %error, "Failed to start node");
            eprintln!("Failed to start node: {error}");
            return ExitCode::FAILURE;
        }
    };

    display_rust_shutter_node_banner();

    match runtime::run(core).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(error = %error, "Node stopped with error");
            ExitCode::FAILURE
        }
    }
}

fn display_rust_shutter_node_banner() {
    tracing::info!("======================================================");
    tracing::info!(
        "             Rust Shutter Node v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!("======================================================");
    tracing::info!("Node is running in {} environment", config::current_env());
}
