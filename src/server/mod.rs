//! MCP server for the site.
//!
//! This module exposes the site's page interactions (menu browsing, partner
//! ordering, contact and newsletter forms) as MCP tools over stdio.

pub mod handlers;

pub use handlers::SiteMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the site MCP server with stdio transport.
///
/// This function starts the MCP server and runs it until the client disconnects.
/// It communicates via stdin/stdout using the MCP protocol.
pub async fn run_server(server: SiteMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;

    service.waiting().await?;

    Ok(())
}
