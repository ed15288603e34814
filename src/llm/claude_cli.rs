use crate::config::LlmConfig;
use crate::dispatch::cli::CliDispatch;
use crate::error::LlmError;
use crate::llm::{GenerateOptions, Llm};
use crate::message::{Message, format_prompt};
use crate::models::{DEFAULT_ALIAS, resolve_alias};

/// Executable invoked when no override is given.
pub const CLAUDE_EXECUTABLE: &str = "claude";

/// Backend that shells out to the `claude` CLI.
///
/// The conversation is flattened into a `System:/Human:/Assistant:` prompt and
/// written to the child's stdin; the model, token limit and temperature go on
/// the command line. Each call spawns one process and holds no state afterwards.
pub struct ClaudeCliLlm {
    config: LlmConfig,
    executable: String,
    cli: CliDispatch,
}

impl ClaudeCliLlm {
    /// Build the backend. A missing model is set to "sonnet".
    pub fn new(mut config: LlmConfig) -> Self {
        if config.model.as_deref().is_none_or(|m| m.is_empty()) {
            config.model = Some(DEFAULT_ALIAS.to_string());
        }
        Self {
            config,
            executable: CLAUDE_EXECUTABLE.to_string(),
            cli: CliDispatch::new(),
        }
    }

    /// Use a different executable (alternate install path, wrapper script).
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Canonical alias for the configured model; unknown names become "sonnet".
    pub fn model_alias(&self) -> &'static str {
        resolve_alias(self.config.model.as_deref().unwrap_or(DEFAULT_ALIAS))
    }

    /// Arguments passed after the executable name.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = vec![
            "chat".to_string(),
            "--model".to_string(),
            self.model_alias().to_string(),
            "--max-tokens".to_string(),
            self.config.max_tokens_or_default().to_string(),
        ];
        if let Some(temperature) = self.config.temperature {
            args.push("--temperature".to_string());
            args.push(temperature.to_string());
        }
        args
    }
}

impl Llm for ClaudeCliLlm {
    fn config(&self) -> &LlmConfig {
        &self.config
    }

    async fn generate_response(
        &self,
        messages: &[Message],
        options: Option<&GenerateOptions>,
    ) -> Result<String, LlmError> {
        if let Some(opts) = options.filter(|o| !o.is_empty()) {
            tracing::debug!(
                has_response_format = opts.response_format.is_some(),
                tool_count = opts.tools.as_ref().map_or(0, Vec::len),
                tool_choice = opts.tool_choice.as_deref(),
                "claude CLI ignores response_format/tools/tool_choice"
            );
        }

        let prompt = format_prompt(messages);
        let args = self.build_args();

        let output = self.cli.run(&self.executable, &args, &prompt).await?;

        if !output.stderr.is_empty() {
            tracing::warn!(stderr = %output.stderr.trim_end(), "Claude CLI warning");
        }

        Ok(output.stdout.trim().to_string())
    }
}
