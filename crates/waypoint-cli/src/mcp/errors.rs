//! Error handling utilities for MCP server

use std::fmt::Display;

use rmcp::{
    model::{CallToolResult, Content},
    ErrorData,
};
use waypoint_core::OperationStatus;

/// Helper to convert infrastructure failures (not planner errors) to MCP errors
pub fn to_mcp_error(message: &str, error: impl Display) -> ErrorData {
    ErrorData::internal_error(format!("{message}: {error}"), None)
}

/// Wraps a reply as tool content. Planner failures are reported as tool
/// errors carrying the same `Error: ...` text the CLI prints.
pub fn to_call_result(status: OperationStatus) -> CallToolResult {
    let content = vec![Content::text(status.to_string())];
    if status.is_failure() {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}
