use crate::types::{Result, SummarizerError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Environment variable that overrides the config list file. Its value is
/// either a path to a JSON file or the JSON itself.
pub const CONFIG_LIST_ENV: &str = "OAI_CONFIG_LIST";

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_AZURE_API_VERSION: &str = "2024-02-01";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiType {
    #[default]
    #[serde(rename = "openai")]
    OpenAi,
    Azure,
}

/// One entry of the model config list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEndpoint {
    pub model: String,
    pub api_key: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_type: ApiType,
    #[serde(default)]
    pub api_version: Option<String>,
}

/// Per-call settings for the summarizing model.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub timeout_seconds: u64,
    pub seed: Option<u64>,
    pub temperature: f32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: 600,
            seed: Some(44),
            temperature: 0.0,
        }
    }
}

/// Parse a config list from JSON text and check that it is usable.
pub fn parse_config_list(json: &str) -> Result<Vec<ModelEndpoint>> {
    let endpoints: Vec<ModelEndpoint> = serde_json::from_str(json)
        .map_err(|e| SummarizerError::Config(format!("Malformed config list: {}", e)))?;

    if endpoints.is_empty() {
        return Err(SummarizerError::Config("Config list is empty".to_string()));
    }

    for (index, endpoint) in endpoints.iter().enumerate() {
        if endpoint.model.trim().is_empty() {
            return Err(SummarizerError::Config(format!(
                "Config list entry {} has no model",
                index
            )));
        }
        if endpoint.api_type == ApiType::Azure && endpoint.base_url.is_none() {
            return Err(SummarizerError::Config(format!(
                "Config list entry {} uses api_type azure without a base_url",
                index
            )));
        }
    }

    Ok(endpoints)
}

pub fn load_config_list_file(path: &Path) -> Result<Vec<ModelEndpoint>> {
    debug!("Reading config list from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| {
        SummarizerError::Config(format!("Cannot read config list {}: {}", path.display(), e))
    })?;
    parse_config_list(&content)
}

/// Resolve the config list: `env_value` (the content of [`CONFIG_LIST_ENV`])
/// wins when set, as a file path if such a file exists and as inline JSON
/// otherwise. Falls back to `default_path`.
pub fn resolve_config_list(
    env_value: Option<&str>,
    default_path: &Path,
) -> Result<Vec<ModelEndpoint>> {
    let endpoints = match env_value.filter(|v| !v.trim().is_empty()) {
        Some(value) if Path::new(value).is_file() => load_config_list_file(Path::new(value))?,
        Some(value) => parse_config_list(value)?,
        None => load_config_list_file(default_path)?,
    };

    info!(
        "Loaded {} model endpoint(s), using model {}",
        endpoints.len(),
        endpoints[0].model
    );
    Ok(endpoints)
}

/// Load the config list from the process environment or `default_path`.
pub fn load_config_list(default_path: &Path) -> Result<Vec<ModelEndpoint>> {
    let env_value = std::env::var(CONFIG_LIST_ENV).ok();
    resolve_config_list(env_value.as_deref(), default_path)
}
