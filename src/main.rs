use rmcp::{ServiceExt, transport::stdio};

use claude_cli_llm::config::Config;
use claude_cli_llm::server::ClaudeCliServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    load_dotenv();

    tracing::info!("claude-cli-llm starting");

    let config = Config::load();
    let server = ClaudeCliServer::new(config);

    let service = server
        .serve(stdio())
        .await
        .inspect_err(|e| tracing::error!("serving error: {e:?}"))?;

    service.waiting().await?;

    tracing::info!("claude-cli-llm shutting down");
    Ok(())
}

/// Load .env from the binary's directory (MCP servers may start with any CWD),
/// then the cargo project root for development builds, then the CWD.
fn load_dotenv() {
    let candidates = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| [dir.join(".env"), dir.join("../../.env")]));

    if let Some(path) = candidates
        .iter()
        .flatten()
        .find(|path| path.exists())
    {
        dotenvy::from_path(path).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}
