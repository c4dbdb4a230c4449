//! Tracing subscriber setup for the binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter directive for a `-v` count when `RUST_LOG` is unset.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install a compact stderr subscriber. `RUST_LOG` takes precedence over
/// the verbosity flag.
pub fn init(verbose: u8) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(crate::utils::colors_enabled())
        .compact();

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(verbose)))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
