use thiserror::Error;

/// Installation remedy surfaced when the CLI executable cannot be found.
pub const INSTALL_HINT: &str = "npm install -g @anthropic-ai/claude-code";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Claude CLI not found ({executable}). Please install it with: {hint}", hint = INSTALL_HINT)]
    ToolNotFound { executable: String },

    #[error("Claude CLI error: {0}")]
    Execution(String),

    #[error("config error: {0}")]
    Config(String),
}

impl LlmError {
    /// Returns true if the failure came from the executable being absent.
    pub fn is_tool_not_found(&self) -> bool {
        matches!(self, Self::ToolNotFound { .. })
    }

    /// Message safe for returning to MCP clients.
    /// Execution failures keep only the tail of the underlying text: CLI tools
    /// print banners first and the actual error last.
    pub fn user_message(&self) -> String {
        match self {
            Self::ToolNotFound { .. } => self.to_string(),
            Self::Execution(message) => {
                let preview: String = message
                    .chars()
                    .rev()
                    .take(200)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                let prefix = if preview.len() < message.len() {
                    "..."
                } else {
                    ""
                };
                format!("Claude CLI error: {prefix}{preview}")
            }
            Self::Config(msg) => format!("config error: {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_not_found_carries_install_hint() {
        let err = LlmError::ToolNotFound {
            executable: "claude".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("npm install -g @anthropic-ai/claude-code"));
        assert!(msg.contains("claude"));
        assert_eq!(err.user_message(), msg);
    }

    #[test]
    fn execution_user_message_keeps_tail() {
        let long = format!("{}the real error", "banner ".repeat(100));
        let msg = LlmError::Execution(long).user_message();
        assert!(msg.starts_with("Claude CLI error: ..."));
        assert!(msg.ends_with("the real error"));
    }

    #[test]
    fn short_execution_message_is_not_truncated() {
        let msg = LlmError::Execution("exit status 1".to_string()).user_message();
        assert_eq!(msg, "Claude CLI error: exit status 1");
    }
}
