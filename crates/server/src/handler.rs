//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use broadsheet_client::{ExtractOptions, ProfileSet};
use broadsheet_core::ArticleDb;

use crate::tools::{
    article_delete::{ArticleDeleteParams, delete_impl},
    article_extract::{ArticleExtractParams, extract_impl},
    article_get::{ArticleGetParams, get_impl},
    profile_list::list_impl,
};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for broadsheet.
#[derive(Clone)]
pub struct BroadsheetServer {
    tool_router: ToolRouter<Self>,
    db: ArticleDb,
    profiles: Arc<ProfileSet>,
    options: ExtractOptions,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl BroadsheetServer {
    /// Create a new server handler.
    pub fn new(db: ArticleDb, profiles: Arc<ProfileSet>, options: ExtractOptions) -> Self {
        Self { tool_router: Self::tool_router(), db, profiles, options }
    }

    /// Extract an article record from HTML with a named site profile.
    ///
    /// No network requests are made; the caller supplies the HTML.
    #[tool(
        description = "Extract title, body, author, publisher and publication date from article HTML using a site profile. Optionally stores the record."
    )]
    async fn article_extract(&self, params: Parameters<ArticleExtractParams>) -> Result<CallToolResult, McpError> {
        extract_impl(&self.db, &self.profiles, self.options, params.0).await
    }

    /// Read a stored article and its citations.
    #[tool(description = "Get a stored article by id, with its paragraph citations.")]
    async fn article_get(&self, params: Parameters<ArticleGetParams>) -> Result<CallToolResult, McpError> {
        get_impl(&self.db, params.0).await
    }

    /// Remove a stored article and its citations.
    #[tool(description = "Delete a stored article and its citations by id.")]
    async fn article_delete(&self, params: Parameters<ArticleDeleteParams>) -> Result<CallToolResult, McpError> {
        delete_impl(&self.db, params.0).await
    }

    /// List the configured site profiles.
    #[tool(description = "List the site profiles available for article_extract.")]
    async fn profile_list(&self) -> Result<CallToolResult, McpError> {
        list_impl(&self.profiles)
    }
}

impl ServerHandler for BroadsheetServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "broadsheet".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
