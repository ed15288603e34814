use std::time::Instant;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use crate::config::{Config, LlmConfig};
use crate::llm::Llm;
use crate::llm::claude_cli::{CLAUDE_EXECUTABLE, ClaudeCliLlm};
use crate::models::DEFAULT_ALIAS;
use crate::response::{CallMetadata, ToolReply};
use crate::tools::chat::{self, ChatRequest};
use crate::tools::listmodels::ListModelsResponse;

#[derive(Clone)]
pub struct ClaudeCliServer {
    llm: LlmConfig,
    executable: String,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ClaudeCliServer {
    pub fn new(config: Config) -> Self {
        Self {
            llm: config.llm,
            executable: config
                .executable
                .unwrap_or_else(|| CLAUDE_EXECUTABLE.to_string()),
            tool_router: Self::tool_router(),
        }
    }

    /// Backend for one request. Built per call: the adapter holds no state
    /// between invocations.
    pub fn backend_for(&self, config: LlmConfig) -> ClaudeCliLlm {
        ClaudeCliLlm::new(config).with_executable(self.executable.clone())
    }

    #[tool(
        name = "chat",
        description = "Send a conversation to Claude through the local `claude` CLI and return its reply. An empty conversation sends an empty prompt. Use `listmodels` for accepted model names.",
        annotations(read_only_hint = true)
    )]
    async fn chat(
        &self,
        Parameters(req): Parameters<ChatRequest>,
    ) -> Result<CallToolResult, McpError> {
        chat::validate_temperature(req.temperature)
            .map_err(|msg| McpError::invalid_params(msg, None))?;

        let start = Instant::now();
        let backend = self.backend_for(req.effective_config(&self.llm));
        let model = backend.model_alias().to_string();

        let result = backend
            .generate_response(&req.messages, Some(&req.options))
            .await;
        if let Err(e) = &result {
            tracing::warn!("chat failed: {e}");
        }

        ToolReply::from_result(result, CallMetadata::new("chat", model, start))
            .into_call_tool_result()
    }

    #[tool(
        name = "listmodels",
        description = "List accepted model names and the CLI alias each one runs on.",
        annotations(read_only_hint = true)
    )]
    async fn listmodels(&self) -> Result<CallToolResult, McpError> {
        let start = Instant::now();
        let configured = self.llm.model.as_deref().unwrap_or(DEFAULT_ALIAS);
        let list = ListModelsResponse::from_table(configured);

        ToolReply::Success {
            content: list.to_markdown(),
            metadata: CallMetadata::new("listmodels", list.configured_alias, start),
        }
        .into_call_tool_result()
    }
}

#[tool_handler]
impl ServerHandler for ClaudeCliServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "claude-cli-llm".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Claude through the local `claude` CLI.\n\n\
                 1. Call `listmodels` for accepted model names.\n\
                 2. Call `chat` with `messages` (role + content). System, user and assistant \
                    turns are sent in order; other roles are skipped.\n\
                 Requires the CLI: npm install -g @anthropic-ai/claude-code"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
