use crate::error::SwaggerUiResult;
pub use tracing::instrument;
pub use tracing::{debug, error, info, trace, warn};
use tracing::Subscriber;
use tracing_error::ErrorLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber: fmt output filtered by `RUST_LOG` (default `info`)
/// plus the [`ErrorLayer`] that lets errors capture span traces.
pub fn init_tracing() -> SwaggerUiResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    subscriber(filter)
        .try_init()
        .map_err(|e| crate::err!("Failed to install tracing subscriber: {}", e))
}

fn subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(ErrorLayer::default())
}
