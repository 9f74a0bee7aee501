pub mod config;
pub mod session;

pub use config::{Config, ConfigValidationError, ValidationResult};
pub use session::{ErrorKind, SessionState, WeatherSession};

use anyhow::Result;

/// Initialize the core application
pub fn init() -> Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Stratus core initialized");
    Ok(())
}
