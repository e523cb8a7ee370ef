//! Request and response DTOs for the API.

use serde::{Deserialize, Serialize};

use rostrum_agent::{AgentConfig, ApiKeys, SearchConfig};
use rostrum_orchestrator::Settings;

use crate::error::{ApiError, Result};

/// Per-role model overrides supplied with a debate request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentOverride {
    /// Model identifier override.
    pub model: Option<String>,
    /// Provider override (e.g. "openai", "anthropic").
    pub provider: Option<String>,
    /// Temperature override.
    pub temperature: Option<f32>,
    /// Token budget override.
    pub max_tokens: Option<u32>,
}

impl AgentOverride {
    fn apply(&self, mut config: AgentConfig) -> Result<AgentConfig> {
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(provider) = &self.provider {
            config.provider = provider
                .parse()
                .map_err(|e: rostrum_agent::AgentError| ApiError::BadRequest(e.to_string()))?;
        }
        if let Some(temperature) = self.temperature {
            config = config.with_temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            config.max_tokens = max_tokens;
        }
        Ok(config)
    }
}

/// Start-debate request body.
#[derive(Debug, Clone, Deserialize)]
pub struct DebateRequest {
    /// Topic to debate.
    pub topic: String,

    /// Turn limit override.
    pub max_turns: Option<u32>,

    /// Session time limit override, in seconds.
    pub max_time: Option<u64>,

    /// Pro agent overrides.
    #[serde(default)]
    pub pro: AgentOverride,

    /// Con agent overrides.
    #[serde(default)]
    pub con: AgentOverride,

    /// Judge agent overrides.
    #[serde(default)]
    pub judge: AgentOverride,

    /// Web search override.
    pub search: Option<SearchConfig>,

    /// Extra vendor credentials for this request.
    pub api_keys: Option<ApiKeys>,
}

impl DebateRequest {
    /// Produces session settings by layering this request's overrides
    /// over the server's base settings.
    pub fn apply(&self, base: &Settings) -> Result<Settings> {
        let mut settings = base.clone();

        if let Some(max_turns) = self.max_turns {
            settings.debate.max_turns = max_turns;
        }
        if let Some(max_time) = self.max_time {
            settings.debate.max_time_secs = max_time;
        }

        settings.agents.pro = self.pro.apply(settings.agents.pro)?;
        settings.agents.con = self.con.apply(settings.agents.con)?;
        settings.agents.judge = self.judge.apply(settings.agents.judge)?;

        if let Some(search) = &self.search {
            settings.search = search.clone();
        }
        if let Some(api_keys) = &self.api_keys {
            settings.api_keys.merge(api_keys.clone());
        }

        Ok(settings)
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Server uptime in seconds.
    pub uptime_seconds: u64,
}
