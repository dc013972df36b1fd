use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Default filter for development: our crates at debug, transport noise at info.
const DEVELOPMENT_FILTER: &str = "debug,h2=info,hyper_util=info,tower=info,sqlx=warn";

/// Default filter for production.
const PRODUCTION_FILTER: &str = "info,sqlx=warn";

/// Install color-eyre with a project-standard configuration.
///
/// Call this early in main() before any fallible operations so that fatal
/// startup errors (configuration, readiness exhaustion) render with their
/// span trace. Safe to call multiple times.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initialize tracing with environment-aware configuration and error span capture.
///
/// - **Production** (`APP_ENV=production`): flattened JSON lines, no module targets
/// - **Development** (default): pretty, human-readable output
///
/// Both include `tracing_error::ErrorLayer` so `eyre` reports carry span traces.
/// `RUST_LOG` overrides the default filter.
///
/// Calling this more than once is harmless; later calls are ignored (common in tests).
pub fn init_tracing(environment: &Environment) {
    let is_production = environment.is_production();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if is_production {
            EnvFilter::new(PRODUCTION_FILTER)
        } else {
            EnvFilter::new(DEVELOPMENT_FILTER)
        }
    });

    let result = if is_production {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(_) => {
            info!(
                "Tracing initialized with ErrorLayer. Environment: {:?}",
                environment
            );
        }
        Err(_) => {
            debug!("Tracing already initialized, skipping re-initialization");
        }
    }
}
