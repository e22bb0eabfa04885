//! mcp-kit dispatch server
//!
//! Serves the tool catalog over JSON-RPC 2.0 on stdio.
//!
//! # Usage
//!
//! ```bash
//! mcp-kit [--catalog <path>]
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Control log verbosity (default: `mcp_kit=info`)
//!
//! Requests and responses go through stdout; logs go to stderr to avoid
//! interfering with the protocol.

use std::path::PathBuf;

use clap::Parser;
use mcp_kit::{McpServer, Registry, tools};

/// JSON-RPC tool dispatch server
#[derive(Parser)]
#[command(name = "mcp-kit")]
#[command(about = "JSON-RPC tool dispatch server")]
#[command(version)]
struct Args {
    /// Path to the tool catalog
    #[arg(short, long, default_value = "tools.json")]
    catalog: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging goes to stderr; stdout is reserved for the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mcp_kit=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!(catalog = ?args.catalog, "Starting mcp-kit server");

    let registry = Registry::load(&args.catalog);
    let server = McpServer::new(registry, tools::builtin_dispatcher());
    server.run().await?;

    Ok(())
}
