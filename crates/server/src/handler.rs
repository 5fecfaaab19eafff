//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the router-backed implementations.
use std::sync::Arc;

use crate::state::AppState;
use crate::tools::cache::{clear_impl, stats_impl};
use crate::tools::navigate::{NavigateParams, navigate_impl};
use crate::tools::page::current_page_impl;

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

/// The main MCP server handler for mdroute.
#[derive(Clone)]
pub struct MdRouteServer {
    state: Arc<AppState>,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl MdRouteServer {
    /// Create a new server handler around a started router.
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state, tool_router: Self::tool_router() }
    }

    /// Navigate to a fragment and load its document.
    #[tool(
        description = "Navigate to a URL fragment (e.g. 'blog/0001'). Loads the mapped Markdown document through the cache and returns the rendered page."
    )]
    async fn navigate_to(&self, params: Parameters<NavigateParams>) -> Result<CallToolResult, McpError> {
        navigate_impl(&self.state, params.0).await
    }

    /// Drop every cached document.
    #[tool(description = "Clear the in-memory document cache and its fingerprint index.")]
    async fn clear_cache(&self) -> Result<CallToolResult, McpError> {
        clear_impl(&self.state).await
    }

    /// Report cache statistics.
    #[tool(
        description = "Get document cache statistics: entry counts, timeout, and whether caching and cache busting are enabled."
    )]
    async fn cache_stats(&self) -> Result<CallToolResult, McpError> {
        stats_impl(&self.state).await
    }

    #[tool(description = "Show the current page: fragment, title, visible region, and its rendered HTML.")]
    async fn current_page(&self) -> Result<CallToolResult, McpError> {
        current_page_impl(&self.state).await
    }
}

impl ServerHandler for MdRouteServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "mdroute".into(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::state;

    #[test]
    fn test_lists_router_tools() {
        let server = MdRouteServer::new(Arc::new(state(&[])));
        let mut names: Vec<String> = server.tool_router.list_all().into_iter().map(|t| t.name.to_string()).collect();
        names.sort();
        assert_eq!(names, vec!["cache_stats", "clear_cache", "current_page", "navigate_to"]);
    }

    #[test]
    fn test_server_info() {
        let server = MdRouteServer::new(Arc::new(state(&[])));
        assert_eq!(server.get_info().server_info.name, "mdroute");
    }
}
