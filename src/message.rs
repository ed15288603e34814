use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Roles the prompt format knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Parse a role string. Anything outside the three known roles yields None.
    pub fn parse(role: &str) -> Option<Self> {
        match role {
            "system" => Some(Self::System),
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }

    /// Line prefix the CLI expects for this speaker.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::System => "System",
            Self::User => "Human",
            Self::Assistant => "Assistant",
        }
    }
}

/// One conversation turn. The role is kept as free text so that callers can
/// pass through roles this adapter does not render (they are dropped at format time).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Message {
    /// Speaker: "system", "user" or "assistant". Defaults to "user".
    #[serde(default = "default_role")]
    pub role: String,
    /// Message text.
    #[serde(default)]
    pub content: String,
}

fn default_role() -> String {
    Role::User.as_str().to_string()
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System.as_str(), content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User.as_str(), content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant.as_str(), content)
    }
}

/// Render a conversation as a single prompt: one `Prefix: content` block per
/// recognized message, in input order, separated by a blank line.
pub fn format_prompt(messages: &[Message]) -> String {
    messages
        .iter()
        .filter_map(|msg| {
            Role::parse(&msg.role).map(|role| format!("{}: {}", role.prefix(), msg.content))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
