/// Canonical alias used when a configured model name is not in the table.
pub const DEFAULT_ALIAS: &str = "sonnet";

/// Accepted model names and the short alias the CLI takes for each.
pub static MODEL_ALIASES: &[(&str, &str)] = &[
    ("opus", "opus"),
    ("claude-opus", "opus"),
    ("claude-4-opus", "opus"),
    ("sonnet", "sonnet"),
    ("claude-sonnet", "sonnet"),
    ("claude-4-sonnet", "sonnet"),
];

/// Look up a model name in the alias table. Unknown names fall back to
/// [`DEFAULT_ALIAS`]; this never fails.
pub fn resolve_alias(model: &str) -> &'static str {
    MODEL_ALIASES
        .iter()
        .find(|(name, _)| *name == model)
        .map(|(_, alias)| *alias)
        .unwrap_or(DEFAULT_ALIAS)
}

/// True if `model` is one of the accepted names (as opposed to hitting the fallback).
pub fn is_known(model: &str) -> bool {
    MODEL_ALIASES.iter().any(|(name, _)| *name == model)
}
