//! navigate_to tool implementation.
//!
//! Assigns the location fragment and, when that changes it, drives the
//! fragment-change path to completion before reporting the resulting page.

use mdroute_core::Error;
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{AppState, PageView};

/// Input parameters for navigate_to tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NavigateParams {
    /// Target fragment, with or without the leading `#` (e.g. "blog/0001").
    pub fragment: String,
}

/// Output structure for navigate_to tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NavigateOutput {
    /// False when the fragment was already current and nothing was loaded.
    pub changed: bool,
    /// Load outcome; absent when nothing was loaded.
    pub loaded: Option<bool>,
    /// The page after navigation.
    pub page: PageView,
}

/// Implementation of the navigate_to tool.
pub async fn navigate_impl(state: &AppState, params: NavigateParams) -> Result<CallToolResult, McpError> {
    if params.fragment.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(Error::InvalidInput(format!("fragment contains whitespace: {:?}", params.fragment)).into());
    }

    let loaded = state.router.navigate_to(&params.fragment).await;
    let output = NavigateOutput { changed: loaded.is_some(), loaded, page: state.view() };

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}
