use std::collections::HashMap;

use claude_cli_llm::config::{Config, DEFAULT_MAX_TOKENS, LlmConfig};
use claude_cli_llm::error::LlmError;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn toml_llm_section_is_parsed() {
    let config = Config::from_toml(
        r#"
[llm]
model = "claude-4-opus"
max_tokens = 4000
temperature = 0.2
executable = "/opt/bin/claude"
"#,
    )
    .unwrap();

    assert_eq!(
        config.llm,
        LlmConfig {
            model: Some("claude-4-opus".to_string()),
            max_tokens: Some(4000),
            temperature: Some(0.2),
        }
    );
    assert_eq!(config.executable.as_deref(), Some("/opt/bin/claude"));
}

#[test]
fn empty_toml_gives_defaults() {
    let config = Config::from_toml("").unwrap();
    assert_eq!(config.llm, LlmConfig::default());
    assert!(config.executable.is_none());
    assert_eq!(config.llm.max_tokens_or_default(), DEFAULT_MAX_TOKENS);
}

#[test]
fn invalid_toml_is_config_error() {
    let err = Config::from_toml("[llm\nmodel = ").unwrap_err();
    assert!(matches!(err, LlmError::Config(_)), "got {err:?}");
}

#[test]
fn wrong_type_is_config_error() {
    let err = Config::from_toml("[llm]\nmax_tokens = \"lots\"").unwrap_err();
    assert!(matches!(err, LlmError::Config(_)), "got {err:?}");
}

#[test]
fn missing_file_is_config_error() {
    let path = std::env::temp_dir().join("claude-cli-llm-missing-config.toml");
    let _ = std::fs::remove_file(&path);
    let err = Config::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("cannot read"), "{err}");
}

#[test]
fn file_is_read_from_disk() {
    let dir = std::env::temp_dir().join(format!("claude-cli-llm-config-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("claude-cli-llm.toml");
    std::fs::write(&path, "[llm]\nmodel = \"opus\"\n").unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.llm.model.as_deref(), Some("opus"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn env_overrides_replace_file_values() {
    let mut config = Config::from_toml("[llm]\nmodel = \"opus\"\nmax_tokens = 100").unwrap();
    config.apply_overrides(lookup(&[
        ("CLAUDE_CLI_MODEL", "claude-sonnet"),
        ("CLAUDE_CLI_MAX_TOKENS", "3000"),
        ("CLAUDE_CLI_TEMPERATURE", "0.5"),
        ("CLAUDE_CLI_EXECUTABLE", "/usr/local/bin/claude"),
    ]));

    assert_eq!(config.llm.model.as_deref(), Some("claude-sonnet"));
    assert_eq!(config.llm.max_tokens, Some(3000));
    assert_eq!(config.llm.temperature, Some(0.5));
    assert_eq!(config.executable.as_deref(), Some("/usr/local/bin/claude"));
}

#[test]
fn unparseable_env_values_are_ignored() {
    let mut config = Config::from_toml("[llm]\nmax_tokens = 100\ntemperature = 0.1").unwrap();
    config.apply_overrides(lookup(&[
        ("CLAUDE_CLI_MAX_TOKENS", "many"),
        ("CLAUDE_CLI_TEMPERATURE", "NaN"),
        ("CLAUDE_CLI_MODEL", "   "),
    ]));

    assert_eq!(config.llm.max_tokens, Some(100));
    assert_eq!(config.llm.temperature, Some(0.1));
    assert!(config.llm.model.is_none());
}

#[test]
fn absent_env_leaves_config_untouched() {
    let mut config = Config::from_toml("[llm]\nmodel = \"opus\"").unwrap();
    config.apply_overrides(lookup(&[]));
    assert_eq!(config.llm.model.as_deref(), Some("opus"));
    assert!(config.llm.temperature.is_none());
}

#[test]
fn zero_max_tokens_from_file_or_env_uses_default() {
    let config = Config::from_toml("[llm]\nmax_tokens = 0").unwrap();
    assert_eq!(config.llm.max_tokens_or_default(), DEFAULT_MAX_TOKENS);

    let mut config = Config::from_toml("[llm]\nmax_tokens = 500").unwrap();
    config.apply_overrides(lookup(&[("CLAUDE_CLI_MAX_TOKENS", "0")]));
    assert_eq!(config.llm.max_tokens_or_default(), DEFAULT_MAX_TOKENS);
}
