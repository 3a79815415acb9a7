use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Log output shape, selected through the `ENVIRONMENT` variable.
/// Anything other than `production` gets the console format.
enum LogFormat {
    Json,
    Console,
}

fn log_format() -> LogFormat {
    match std::env::var("ENVIRONMENT").as_deref() {
        Ok("production") => LogFormat::Json,
        _ => LogFormat::Console,
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured default level. Every log line goes
/// to stderr; stdout carries command output only.
pub fn init_observability(service_name: &str, service_version: &str, log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    match log_format() {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_filter(filter);
            tracing_subscriber::registry().with(layer).try_init()?;
        }
        LogFormat::Console => {
            let layer = fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(filter);
            tracing_subscriber::registry().with(layer).try_init()?;
        }
    }

    tracing::debug!(
        service.name = service_name,
        service.version = service_version,
        "observability ready"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_claims_the_subscriber_slot() {
        // The only init call in this test binary, so the global slot is free.
        assert!(init_observability("test-service", "0.1.0", "debug").is_ok());

        // A second install attempt must surface as an error, not a panic.
        assert!(init_observability("test-service", "0.1.0", "debug").is_err());
    }
}
