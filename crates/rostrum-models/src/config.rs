//! Debate session configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Bounds for a single debate session.
///
/// Immutable for the session's lifetime. Time fields are stored as whole
/// seconds so the config can round-trip through YAML settings files;
/// zero values behave as an immediately-expired bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateConfig {
    /// Maximum number of generated arguments (pro + con combined).
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,

    /// Maximum wall-clock time for the whole debate, in seconds.
    #[serde(default = "default_max_time", alias = "max_time")]
    pub max_time_secs: u64,

    /// Deadline between consecutive turns, in seconds.
    #[serde(default = "default_turn_timeout", alias = "turn_timeout")]
    pub turn_timeout_secs: u64,
}

fn default_max_turns() -> u32 {
    10
}

fn default_max_time() -> u64 {
    1800
}

fn default_turn_timeout() -> u64 {
    120
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
            max_time_secs: default_max_time(),
            turn_timeout_secs: default_turn_timeout(),
        }
    }
}

impl DebateConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the turn limit.
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Sets the session time limit.
    pub fn with_max_time(mut self, max_time: Duration) -> Self {
        self.max_time_secs = max_time.as_secs();
        self
    }

    /// Sets the per-turn deadline.
    pub fn with_turn_timeout(mut self, timeout: Duration) -> Self {
        self.turn_timeout_secs = timeout.as_secs();
        self
    }

    /// The session time limit as a [`Duration`].
    pub fn max_time(&self) -> Duration {
        Duration::from_secs(self.max_time_secs)
    }

    /// The per-turn deadline as a [`Duration`].
    pub fn turn_timeout(&self) -> Duration {
        Duration::from_secs(self.turn_timeout_secs)
    }
}
