use schemars::JsonSchema;
use serde::Deserialize;

use crate::config::LlmConfig;
use crate::llm::GenerateOptions;
use crate::message::Message;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ChatRequest {
    /// Conversation in order. Roles: "system", "user", "assistant"; other roles are ignored.
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Model name: opus, claude-opus, claude-4-opus, sonnet, claude-sonnet, claude-4-sonnet.
    /// Unknown names run on sonnet. Defaults to the server's configured model.
    pub model: Option<String>,
    /// Maximum tokens to generate (default 2000; 0 also means the default).
    pub max_tokens: Option<u32>,
    /// Sampling temperature between 0.0 and 1.0. Omit to use the CLI default.
    pub temperature: Option<f64>,
    /// Accepted for compatibility with other backends; not used by the CLI.
    #[serde(flatten)]
    pub options: GenerateOptions,
}

impl ChatRequest {
    /// Server defaults with this request's overrides applied.
    pub fn effective_config(&self, base: &LlmConfig) -> LlmConfig {
        LlmConfig {
            model: self
                .model
                .clone()
                .filter(|m| !m.trim().is_empty())
                .or_else(|| base.model.clone()),
            max_tokens: self.max_tokens.or(base.max_tokens),
            temperature: self.temperature.or(base.temperature),
        }
    }
}

pub fn validate_temperature(temp: Option<f64>) -> Result<(), String> {
    if let Some(t) = temp
        && (t.is_nan() || t.is_infinite() || !(0.0..=1.0).contains(&t))
    {
        return Err(format!("temperature must be between 0.0 and 1.0, got {t}"));
    }
    Ok(())
}
