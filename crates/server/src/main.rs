//! coinwatch-server — demo MCP server over stdio.
//!
//! Exposes two tools (`hello-world`, `bitcoin_price`), one prompt, and one
//! static resource. The Bitcoin price tool does a single CoinGecko fetch
//! per invocation; failures are rendered into the tool's text payload.
//!
//! stdout carries the protocol stream, so all logging goes to stderr.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use coinwatch_mcp::server::McpServer;
use coinwatch_mcp::transport::StdioTransport;
use coinwatch_mcp::{PromptRegistry, ResourceRegistry};
use coinwatch_quote::source::{CoinGeckoClient, DEFAULT_API_URL};
use coinwatch_tool_runtime::{BitcoinPriceTool, HelloTool, ToolRegistry};

mod prompts;
mod resources;

use prompts::TestPrompt;
use resources::TestResource;

// ── CLI ─────────────────────────────────────────────────────────────

/// Demo MCP server with a Bitcoin price lookup tool.
#[derive(Parser, Debug)]
#[command(name = "coinwatch-server", version, about)]
struct Cli {
    /// Simple-price endpoint to query.
    #[arg(long, env = "COINWATCH_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Client-side HTTP timeout in seconds.
    #[arg(long, env = "COINWATCH_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// Server name advertised during initialization.
    #[arg(long, env = "COINWATCH_SERVER_NAME", default_value = "coinwatch")]
    server_name: String,
}

// ── main ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let source = CoinGeckoClient::with_config(&cli.api_url, Duration::from_secs(cli.timeout_secs))
        .context("failed to build HTTP client")?;

    // Registration failures are configuration errors: fail fast.
    let mut tools = ToolRegistry::new();
    tools
        .register(HelloTool)
        .context("failed to register hello-world tool")?;
    tools
        .register(BitcoinPriceTool::new(Arc::new(source)))
        .context("failed to register bitcoin_price tool")?;

    let mut prompts = PromptRegistry::new();
    prompts
        .register(TestPrompt)
        .context("failed to register prompt_test")?;

    let mut resources = ResourceRegistry::new();
    resources
        .register(TestResource)
        .context("failed to register test://resource")?;

    info!(
        api_url = %cli.api_url,
        timeout_secs = cli.timeout_secs,
        "starting MCP server"
    );

    let mut server = McpServer::new(tools)
        .with_name(cli.server_name)
        .with_prompts(prompts)
        .with_resources(resources);

    let mut transport = StdioTransport::new();
    server.run(&mut transport).await?;

    info!("MCP server stopped");
    Ok(())
}
