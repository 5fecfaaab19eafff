//! clear_cache tool implementation.
//!
//! Drops every cached document and fingerprint.

use mdroute_core::CacheStats;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};

use crate::state::AppState;

/// Implementation of the clear_cache tool. Reports stats after clearing.
pub async fn clear_impl(state: &AppState) -> Result<CallToolResult, McpError> {
    state.router.clear_cache().await;
    let stats: CacheStats = state.router.cache_stats().await;

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&stats).unwrap_or_default(),
    )]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::state;

    #[tokio::test]
    async fn test_clear_after_navigation() {
        let state = state(&[("public/home.md", "# Home"), ("public/about.md", "# About")]);
        state.router.start().await;
        state.router.navigate_to("about").await;
        assert_eq!(state.router.cache_stats().await.entry_count, 2);

        let result = clear_impl(&state).await.unwrap();
        let content_val = serde_json::to_value(&result.content[0]).unwrap();
        let text = content_val
            .get("text")
            .and_then(|v| v.as_str())
            .expect("Expected text field in content");
        let stats: CacheStats = serde_json::from_str(text).unwrap();

        assert_eq!(stats.entry_count, 0);
        assert_eq!(stats.hash_index_count, 0);
    }
}
