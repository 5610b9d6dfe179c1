//! CLI command implementations.
//!
//! - [`serve`] - Run the HTTP server
//! - [`records`] - Dump stored diagnosis records

pub mod records;
pub mod serve;

/// Initialize stdout logging.
///
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_tracing(json: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
