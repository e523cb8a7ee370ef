//! Debate session phases.

use serde::{Deserialize, Serialize};

/// The sequential stages of a debate session.
///
/// Every session starts at `Research` and terminates at `Done` or, on
/// an unrecovered error, at the absorbing `Failed` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebatePhase {
    /// Judge gathers topic research before the debate.
    Research,
    /// Pro and con alternate generating arguments.
    Debate,
    /// Judge scores the completed debate.
    Judgment,
    /// Session finished with a result — terminal state.
    Done,
    /// Session hit an unrecovered error — terminal state.
    Failed,
}

impl DebatePhase {
    /// Whether this is a terminal phase (no further transitions).
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl std::fmt::Display for DebatePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Research => write!(f, "research"),
            Self::Debate => write!(f, "debate"),
            Self::Judgment => write!(f, "judgment"),
            Self::Done => write!(f, "done"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_phases() {
        assert!(DebatePhase::Done.is_terminal());
        assert!(DebatePhase::Failed.is_terminal());
        assert!(!DebatePhase::Research.is_terminal());
        assert!(!DebatePhase::Debate.is_terminal());
        assert!(!DebatePhase::Judgment.is_terminal());
    }

    #[test]
    fn test_phase_serialization() {
        assert_eq!(
            serde_json::to_string(&DebatePhase::Research).unwrap(),
            "\"research\""
        );
        let phase: DebatePhase = serde_json::from_str("\"judgment\"").unwrap();
        assert_eq!(phase, DebatePhase::Judgment);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(DebatePhase::Debate.to_string(), "debate");
        assert_eq!(DebatePhase::Failed.to_string(), "failed");
    }
}
