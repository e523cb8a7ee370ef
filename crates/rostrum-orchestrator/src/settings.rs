//! Settings aggregate: debate bounds, per-role models, search, keys.
//!
//! Loaded from an optional YAML file, with vendor credentials merged in
//! from the process environment (the binary loads `.env` first).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use rostrum_agent::{AgentConfig, ApiKeys, SearchConfig};
use rostrum_models::DebateConfig;

use crate::error::Result;

/// Model configuration for each of the three roles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentsSettings {
    /// Pro debater model.
    #[serde(default)]
    pub pro: AgentConfig,
    /// Con debater model.
    #[serde(default)]
    pub con: AgentConfig,
    /// Judge model.
    #[serde(default)]
    pub judge: AgentConfig,
}

/// Full configuration for constructing debate sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Turn and time bounds.
    #[serde(default)]
    pub debate: DebateConfig,

    /// Per-role model configuration.
    #[serde(default)]
    pub agents: AgentsSettings,

    /// Web search configuration.
    #[serde(default)]
    pub search: SearchConfig,

    /// Vendor credentials (settings file entries plus environment).
    #[serde(default)]
    pub api_keys: ApiKeys,

    /// Directory holding per-role prompt template overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompts_dir: Option<PathBuf>,
}

impl Settings {
    /// Loads settings from an optional YAML file, then merges vendor
    /// credentials from the environment (environment wins).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => {
                info!(path = %path.display(), "loading settings file");
                let raw = std::fs::read_to_string(path)?;
                serde_yaml::from_str(&raw)?
            }
            None => Self::default(),
        };

        settings.api_keys.merge(ApiKeys::from_env());
        Ok(settings)
    }
}
