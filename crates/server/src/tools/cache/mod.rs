//! Cache-related MCP tools.
//!
//! This module provides tools for inspecting and clearing the document cache.

pub mod clear;
pub mod stats;

pub use clear::clear_impl;
pub use stats::stats_impl;
