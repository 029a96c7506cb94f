use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "torreblanca=info";

/// Initialise console logging. Logs go to stderr so command output on
/// stdout stays clean for piping.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_covers_every_workspace_crate() {
        let subscriber = tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "torreblanca", tracing::Level::INFO));
            assert!(tracing::enabled!(target: "torreblanca_client", tracing::Level::INFO));
            assert!(tracing::enabled!(target: "torreblanca_hooks", tracing::Level::INFO));
            assert!(!tracing::enabled!(target: "torreblanca_client", tracing::Level::DEBUG));
        });
    }
}
