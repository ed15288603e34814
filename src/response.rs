use std::time::Instant;

use rmcp::ErrorData as McpError;
use rmcp::model::{CallToolResult, Content};
use serde::Serialize;

use crate::error::LlmError;

/// Which failure a call hit: a missing install needs a different fix than a
/// CLI run that went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    ToolNotFound,
    Execution,
    Config,
}

impl From<&LlmError> for FailureKind {
    fn from(err: &LlmError) -> Self {
        match err {
            LlmError::ToolNotFound { .. } => Self::ToolNotFound,
            LlmError::Execution(_) => Self::Execution,
            LlmError::Config(_) => Self::Config,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CallMetadata {
    pub tool_name: &'static str,
    pub model_used: String,
    pub duration_ms: u64,
}

impl CallMetadata {
    pub fn new(tool_name: &'static str, model_used: impl Into<String>, started: Instant) -> Self {
        Self {
            tool_name,
            model_used: model_used.into(),
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Tool payload, serialized as `{"status": "success" | "error", ...}`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolReply {
    Success {
        content: String,
        metadata: CallMetadata,
    },
    Error {
        kind: FailureKind,
        message: String,
        metadata: CallMetadata,
    },
}

impl ToolReply {
    pub fn from_result(result: Result<String, LlmError>, metadata: CallMetadata) -> Self {
        match result {
            Ok(content) => Self::Success { content, metadata },
            Err(e) => Self::Error {
                kind: FailureKind::from(&e),
                message: e.user_message(),
                metadata,
            },
        }
    }

    /// Failures stay in the payload; the MCP call itself succeeds so a client
    /// running several tool calls does not abandon the others.
    pub fn into_call_tool_result(self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::json(self)?]))
    }
}
