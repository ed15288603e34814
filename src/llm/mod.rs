pub mod claude_cli;

use std::future::Future;

use schemars::JsonSchema;
use serde::Deserialize;

use crate::config::LlmConfig;
use crate::error::LlmError;
use crate::message::Message;

/// Extra request options. Backends that cannot honour them accept and ignore them
/// so every backend takes the same call shape.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GenerateOptions {
    /// Requested response format (e.g. `{"type": "json_object"}`).
    pub response_format: Option<serde_json::Value>,
    /// Tool definitions available to the model.
    pub tools: Option<Vec<serde_json::Value>>,
    /// Tool selection strategy ("auto", "none", ...).
    pub tool_choice: Option<String>,
}

impl GenerateOptions {
    pub fn is_empty(&self) -> bool {
        self.response_format.is_none() && self.tools.is_none() && self.tool_choice.is_none()
    }
}

/// A language-model backend: turns a conversation into one response string.
pub trait Llm: Send + Sync {
    fn config(&self) -> &LlmConfig;

    fn generate_response(
        &self,
        messages: &[Message],
        options: Option<&GenerateOptions>,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;
}
