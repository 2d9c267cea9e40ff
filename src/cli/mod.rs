//! CLI command handlers

pub mod commands;

pub use commands::{resolve_config, rows, scan, ScanOptions};

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber; `RUST_LOG` wins over `verbose`
pub fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let default_filter = match verbose {
        0 => "barscan=warn",
        1 => "barscan=info",
        _ => "barscan=debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))
}
