//! Events emitted by a streaming debate session.

use serde::{Deserialize, Serialize};

use rostrum_models::{DebateResult, Message};

use crate::phase::DebatePhase;

/// One event in a streaming debate.
///
/// A stream is a finite, ordered, non-restartable sequence: phase
/// transitions and messages as they occur, ending with exactly one
/// terminal `Complete` or `Error` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DebateEvent {
    /// The session entered a new phase.
    Phase {
        /// The phase entered.
        phase: DebatePhase,
    },
    /// A message was appended to the conversation log.
    Message {
        /// The appended message.
        message: Message,
    },
    /// The session finished; carries the full result.
    Complete {
        /// The terminal debate result.
        result: DebateResult,
    },
    /// The session cannot continue.
    Error {
        /// Description of the failure.
        error: String,
    },
}

impl DebateEvent {
    /// Returns true for the two terminal event kinds.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete { .. } | Self::Error { .. })
    }
}
