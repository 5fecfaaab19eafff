//! MCP tool implementations.
//!
//! This module contains all tools exposed by the mdroute server.

pub mod cache;
pub mod navigate;
pub mod page;
