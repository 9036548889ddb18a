use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Initialize tracing and logging
///
/// `RUST_LOG` wins over the configured level. The `json` format emits one
/// structured record per line; anything else is human-readable console output.
pub fn init_observability(service_name: &str, service_version: &str, config: &LoggingConfig) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    if config.format == "json" {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true),
            )
            .try_init()?;
    }

    tracing::info!(
        service.name = service_name,
        service.version = service_version,
        log.format = %config.format,
        "Logging initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observability_init_once() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: "json".to_string(),
        };

        let first = init_observability("test-service", "0.1.0", &config);
        assert!(first.is_ok(), "Logging init should succeed: {:?}", first.err());

        // A global subscriber can only be installed once per process.
        assert!(init_observability("test-service", "0.1.0", &config).is_err());
    }
}
