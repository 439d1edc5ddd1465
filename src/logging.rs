//! Logging setup.
//!
//! Installs a `tracing_subscriber` fmt subscriber. `RUST_LOG` takes precedence
//! over the configured filter. Only the first call has any effect, so hosts
//! and tests can call `init` freely.

use crate::constants::DEFAULT_LOG_FILTER;
use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static INIT: OnceCell<bool> = OnceCell::new();

/// Install the global subscriber with `filter` as the default directive.
///
/// Returns `false` if another subscriber was already installed elsewhere.
pub fn init(filter: &str) -> bool {
    *INIT.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(filter))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let installed = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .try_init()
            .is_ok();

        if installed {
            tracing::debug!(filter, "Logging initialised");
        }
        installed
    })
}
