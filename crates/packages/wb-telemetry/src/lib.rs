use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;

/// `RUST_LOG` when set, otherwise `default_level` (e.g. the configured `log.level`).
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Installs the global subscriber.
///
/// Events go to stderr so machine-readable output on stdout stays clean.
/// Fails if a global subscriber is already set.
pub fn init_subscriber(service_name: &str, default_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        );
    tracing::subscriber::set_global_default(subscriber)?;
    tracing::debug!(service = service_name, "Tracing subscriber installed");

    Ok(())
}
