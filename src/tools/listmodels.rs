use serde::Serialize;

use crate::models::{DEFAULT_ALIAS, MODEL_ALIASES, is_known, resolve_alias};

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub name: String,
    pub alias: String,
}

impl From<&(&str, &str)> for ModelInfo {
    fn from((name, alias): &(&str, &str)) -> Self {
        Self {
            name: name.to_string(),
            alias: alias.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListModelsResponse {
    pub models: Vec<ModelInfo>,
    pub configured: String,
    /// CLI alias the configured model actually runs on.
    pub configured_alias: &'static str,
    /// False when the configured name is not in the table and falls back.
    pub configured_known: bool,
}

impl ListModelsResponse {
    pub fn from_table(configured: &str) -> Self {
        Self {
            models: MODEL_ALIASES.iter().map(ModelInfo::from).collect(),
            configured: configured.to_string(),
            configured_alias: resolve_alias(configured),
            configured_known: is_known(configured),
        }
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::from("| model | CLI alias |\n|---|---|\n");
        for m in &self.models {
            out.push_str(&format!("| {} | {} |\n", m.name, m.alias));
        }
        if self.configured_known {
            out.push_str(&format!(
                "\nConfigured model: {} (runs on {}).",
                self.configured, self.configured_alias
            ));
        } else {
            out.push_str(&format!(
                "\nConfigured model: {} is not listed and falls back to {}.",
                self.configured, self.configured_alias
            ));
        }
        out.push_str(&format!(" Unlisted names run on {DEFAULT_ALIAS}."));
        out
    }
}
