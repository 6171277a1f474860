//! Schematic MCP Server
//!
//! Exposes Schematic companies, plans, features, entitlements, and company overrides to AI
//! agents as MCP tools.
//!
//! ## Usage
//!
//! Set `SCHEMATIC_API_KEY` (or `apiKey` in `~/.schematic-mcp/config.json`) and add to your MCP
//! client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "schematic": {
//!       "command": "schematic-mcp"
//!     }
//!   }
//! }
//! ```

use anyhow::Result;
use rmcp::transport::stdio;
use rmcp::ServiceExt;
use schematic_api::HttpBillingApi;
use std::sync::Arc;

mod config;
mod error;
#[cfg(test)]
mod test_support;
mod tools;

use tools::{ApiHandle, SchematicService};

#[tokio::main]
async fn main() -> Result<()> {
    // Configure logging to stderr only (stdout is for MCP protocol)
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,schematic_mcp=info"),
    )
    .target(env_logger::Target::Stderr)
    .init();

    let service = SchematicService::new(api_handle()?);
    let server = service.serve(stdio()).await?;
    log::info!("Schematic MCP server running on stdio");

    server.waiting().await?;

    log::info!("Schematic MCP server stopped");
    Ok(())
}

/// A missing key is not fatal: the server still answers `tools/list`.
fn api_handle() -> Result<ApiHandle> {
    let api_key = match config::resolve_api_key() {
        Ok(key) => key,
        Err(err) => {
            log::warn!("{err}");
            return Ok(ApiHandle::Unconfigured(err.to_string()));
        }
    };

    let base_url = config::api_base_url();
    log::debug!("Using Schematic API at {base_url}");
    let api = HttpBillingApi::new(base_url, api_key)?;
    Ok(ApiHandle::Ready(Arc::new(api)))
}
