//! Process-wide tracing subscriber and the optional Prometheus exporter.
//!
//! Both are installed once from `build_core`, before the repository and the
//! chain provider are touched, so their startup logs are captured.

mod config;

pub(crate) use config::{LogFormat, LoggerConfig, TelemetryConfig, TelemetryMetricsConfig};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use thiserror::Error;
use tracing_subscriber::{
    EnvFilter, Layer, filter::ParseError, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

#[derive(Error, Debug)]
pub(crate) enum LoggerError {
    #[error("Invalid log level directive `{level}`: {source}")]
    InvalidLevel {
        level: String,
        #[source]
        source: ParseError,
    },

    #[error("Failed to start Prometheus exporter on {bind_address}: {source}")]
    MetricsExporter {
        bind_address: std::net::SocketAddr,
        #[source]
        source: BuildError,
    },
}

/// Installs the global subscriber and, when enabled, the metrics exporter.
///
/// `RUST_LOG` replaces the configured level when set.
pub(crate) fn initialize(
    logger_config: &LoggerConfig,
    telemetry_config: &TelemetryConfig,
) -> Result<(), LoggerError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => level_filter(&logger_config.level)?,
    };

    let fmt_layer = match logger_config.format {
        LogFormat::Pretty => fmt::layer().with_target(true).boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    initialize_metrics(&telemetry_config.metrics)
}

fn level_filter(level: &str) -> Result<EnvFilter, LoggerError> {
    EnvFilter::try_new(level).map_err(|source| LoggerError::InvalidLevel {
        level: level.to_string(),
        source,
    })
}

fn initialize_metrics(metrics_config: &TelemetryMetricsConfig) -> Result<(), LoggerError> {
    if !metrics_config.enabled {
        tracing::debug!("Prometheus exporter disabled");
        return Ok(());
    }

    let bind_address = metrics_config.bind_address;
    PrometheusBuilder::new()
        .with_http_listener(bind_address)
        .install()
        .map_err(|source| LoggerError::MetricsExporter {
            bind_address,
            source,
        })?;

    tracing::info!(%bind_address, "Prometheus exporter listening");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_level_accepts_per_crate_directives() {
        assert!(level_filter("info").is_ok());
        assert!(level_filter("rust_shutter_node=debug,shutter_blockchain=trace").is_ok());
    }

    #[test]
    fn test_malformed_level_is_reported() {
        let error = level_filter("shutter_blockchain=loud").unwrap_err();
        assert!(matches!(
            error,
            LoggerError::InvalidLevel { ref level, .. } if level == "shutter_blockchain=loud"
        ));
    }

    #[test]
    fn test_disabled_exporter_is_not_installed() {
        let metrics = TelemetryMetricsConfig {
            enabled: false,
            bind_address: ([127, 0, 0, 1], 0).into(),
        };
        assert!(initialize_metrics(&metrics).is_ok());
    }
}
