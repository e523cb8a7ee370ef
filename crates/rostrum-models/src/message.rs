//! Message and role types for debate conversations.
//!
//! Messages are immutable once created: they record who spoke, what was
//! said, and when, plus free-form metadata (turn numbers, phase markers,
//! model information).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error returned when parsing a role from a string fails.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

/// Producer identity of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Agent arguing in favor of the topic.
    Pro,
    /// Agent arguing against the topic.
    Con,
    /// Agent that researches and scores the debate.
    Judge,
    /// Session-generated marker (phase transitions, verdicts).
    System,
}

impl Role {
    /// Returns true for the two debating roles (pro and con).
    pub fn is_debater(self) -> bool {
        matches!(self, Self::Pro | Self::Con)
    }

    /// The opposing debater role. Judge and system map to themselves.
    pub fn opponent(self) -> Self {
        match self {
            Self::Pro => Self::Con,
            Self::Con => Self::Pro,
            other => other,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pro => write!(f, "pro"),
            Self::Con => write!(f, "con"),
            Self::Judge => write!(f, "judge"),
            Self::System => write!(f, "system"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pro" => Ok(Self::Pro),
            "con" => Ok(Self::Con),
            "judge" => Ok(Self::Judge),
            "system" => Ok(Self::System),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

/// A single message in a debate conversation.
///
/// Conversation order equals generation order; the log that stores
/// messages preserves insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message producer.
    pub role: Role,

    /// Text content of the message.
    pub content: String,

    /// When the message was created.
    pub timestamp: DateTime<Utc>,

    /// Free-form metadata (turn number, phase, model/provider).
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Message {
    /// Creates a new message with the current timestamp.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
            metadata: HashMap::new(),
        }
    }

    /// Creates a pro message.
    pub fn pro(content: impl Into<String>) -> Self {
        Self::new(Role::Pro, content)
    }

    /// Creates a con message.
    pub fn con(content: impl Into<String>) -> Self {
        Self::new(Role::Con, content)
    }

    /// Creates a judge message.
    pub fn judge(content: impl Into<String>) -> Self {
        Self::new(Role::Judge, content)
    }

    /// Creates a system marker message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Attaches a metadata entry, consuming and returning the message.
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// The turn number recorded in metadata, if any.
    pub fn turn(&self) -> Option<u64> {
        self.metadata.get("turn").and_then(|v| v.as_u64())
    }

    /// The phase marker recorded in metadata, if any.
    pub fn phase(&self) -> Option<&str> {
        self.metadata.get("phase").and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Pro.to_string(), "pro");
        assert_eq!(Role::Con.to_string(), "con");
        assert_eq!(Role::Judge.to_string(), "judge");
        assert_eq!(Role::System.to_string(), "system");
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("pro".parse::<Role>().unwrap(), Role::Pro);
        assert_eq!("CON".parse::<Role>().unwrap(), Role::Con);
        assert!("moderator".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_is_debater() {
        assert!(Role::Pro.is_debater());
        assert!(Role::Con.is_debater());
        assert!(!Role::Judge.is_debater());
        assert!(!Role::System.is_debater());
    }

    #[test]
    fn test_role_opponent() {
        assert_eq!(Role::Pro.opponent(), Role::Con);
        assert_eq!(Role::Con.opponent(), Role::Pro);
        assert_eq!(Role::Judge.opponent(), Role::Judge);
    }

    #[test]
    fn test_message_constructors() {
        let msg = Message::pro("Opening argument");
        assert_eq!(msg.role, Role::Pro);
        assert_eq!(msg.content, "Opening argument");
        assert!(msg.metadata.is_empty());

        let msg = Message::system("Research completed");
        assert_eq!(msg.role, Role::System);
    }

    #[test]
    fn test_message_metadata_accessors() {
        let msg = Message::pro("Argument")
            .with_metadata("turn", json!(3))
            .with_metadata("phase", json!("debate"));

        assert_eq!(msg.turn(), Some(3));
        assert_eq!(msg.phase(), Some("debate"));

        let bare = Message::con("Rebuttal");
        assert_eq!(bare.turn(), None);
        assert_eq!(bare.phase(), None);
    }

    #[test]
    fn test_message_serialization_roundtrip() {
        let msg = Message::judge("Verdict").with_metadata("score", json!({"pro": 70}));

        let json = serde_json::to_string(&msg).unwrap();
        let parsed: Message = serde_json::from_str(&json).unwrap();

        assert_eq!(msg, parsed);
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Pro).unwrap(), "\"pro\"");
        let role: Role = serde_json::from_str("\"judge\"").unwrap();
        assert_eq!(role, Role::Judge);
    }
}
