//! cache_stats tool implementation.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};

use crate::state::AppState;

/// Implementation of the cache_stats tool.
pub async fn stats_impl(state: &AppState) -> Result<CallToolResult, McpError> {
    let stats = state.router.cache_stats().await;

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&stats).unwrap_or_default(),
    )]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::state;
    use mdroute_core::CacheStats;

    #[tokio::test]
    async fn test_stats_defaults() {
        let state = state(&[]);
        let result = stats_impl(&state).await.unwrap();
        let content_val = serde_json::to_value(&result.content[0]).unwrap();
        let text = content_val.get("text").and_then(|v| v.as_str()).unwrap();
        let stats: CacheStats = serde_json::from_str(text).unwrap();

        assert_eq!(stats.entry_count, 0);
        assert_eq!(stats.timeout_ms, 300_000);
        assert!(stats.cache_enabled);
        assert!(!stats.busting_enabled);
    }
}
