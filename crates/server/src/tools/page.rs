//! current_page tool implementation.

use rmcp::{ErrorData as McpError, model::*};

use crate::state::AppState;

/// Implementation of the current_page tool.
pub async fn current_page_impl(state: &AppState) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&state.view()).unwrap_or_default(),
    )]))
}
