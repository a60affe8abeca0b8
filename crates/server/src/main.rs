//! broadsheet server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use broadsheet_client::{ExtractOptions, ProfileSet};
use broadsheet_core::{AppConfig, ArticleDb};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let profiles = ProfileSet::load(config.require_profiles_path()?)?;
    let db = ArticleDb::open(&config.db_path).await?;

    tracing::info!(
        db_path = %config.db_path.display(),
        profiles = profiles.len(),
        date_policy = ?config.date_policy,
        "Starting broadsheet server on stdio transport"
    );

    let handler = handler::BroadsheetServer::new(db, Arc::new(profiles), ExtractOptions::from(&config));
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
