use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::LlmError;

/// Config file consulted when `CLAUDE_CLI_LLM_CONFIG` is not set.
pub const DEFAULT_CONFIG_FILE: &str = "claude-cli-llm.toml";

/// Max tokens passed to the CLI when none is configured.
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Generation settings shared by every backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LlmConfig {
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
}

impl LlmConfig {
    /// Configured limit, with 0 treated the same as unset.
    pub fn max_tokens_or_default(&self) -> u32 {
        self.max_tokens
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_TOKENS)
    }
}

/// `[llm]` table plus the executable override.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LlmSection {
    model: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f64>,
    executable: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    llm: LlmSection,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub llm: LlmConfig,
    /// Overrides the CLI executable name (None = `claude` from PATH).
    pub executable: Option<String>,
}

impl Config {
    /// Load from the TOML file (if any), then apply environment overrides.
    /// A broken config file is logged and ignored so the server still starts.
    pub fn load() -> Self {
        let mut config = match config_path() {
            Some(path) => match Self::from_file(&path) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "loaded config file");
                    config
                }
                Err(e) => {
                    tracing::warn!("{e}; falling back to defaults");
                    Self::default()
                }
            },
            None => Self::default(),
        };
        config.apply_env();
        config
    }

    pub fn from_file(path: &Path) -> Result<Self, LlmError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| LlmError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::parse(&raw)
            .map_err(|e| LlmError::Config(format!("invalid TOML in {}: {e}", path.display())))
    }

    pub fn from_toml(raw: &str) -> Result<Self, LlmError> {
        Self::parse(raw).map_err(|e| LlmError::Config(format!("invalid TOML: {e}")))
    }

    fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        let file: ConfigFile = toml::from_str(raw)?;
        let LlmSection {
            model,
            max_tokens,
            temperature,
            executable,
        } = file.llm;
        Ok(Self {
            llm: LlmConfig {
                model,
                max_tokens,
                temperature,
            },
            executable,
        })
    }

    fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply overrides from a key lookup. Split out from `apply_env` so tests
    /// need not mutate the process environment.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(model) = lookup("CLAUDE_CLI_MODEL").filter(|m| !m.trim().is_empty()) {
            self.llm.model = Some(model);
        }
        if let Some(raw) = lookup("CLAUDE_CLI_MAX_TOKENS") {
            match raw.trim().parse::<u32>() {
                Ok(n) => self.llm.max_tokens = Some(n),
                Err(_) => tracing::warn!(value = %raw, "ignoring unparseable CLAUDE_CLI_MAX_TOKENS"),
            }
        }
        if let Some(raw) = lookup("CLAUDE_CLI_TEMPERATURE") {
            match raw.trim().parse::<f64>() {
                Ok(t) if t.is_finite() => self.llm.temperature = Some(t),
                _ => tracing::warn!(value = %raw, "ignoring unparseable CLAUDE_CLI_TEMPERATURE"),
            }
        }
        if let Some(exe) = lookup("CLAUDE_CLI_EXECUTABLE").filter(|e| !e.trim().is_empty()) {
            self.executable = Some(exe);
        }
    }
}

fn config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("CLAUDE_CLI_LLM_CONFIG") {
        return Some(PathBuf::from(path));
    }
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    local.exists().then_some(local)
}
