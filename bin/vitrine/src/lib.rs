//! Vitrine CLI Library
//!
//! Command implementations for the Vitrine search tooling CLI. Split from
//! the binary entry point so the commands stay testable and documented.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (index, check)

pub mod cmd;

// Re-export core types for convenience
pub use vitrine_core::Config;
pub use vitrine_search::{IndexBuilder, SearchIndex};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
