//! Terminal debate result types.

use serde::{Deserialize, Serialize};

use crate::judgment::{DebateScores, Judgment, JudgmentAnalysis, Winner};
use crate::message::Message;

/// Summary metadata attached to a completed debate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateMetadata {
    /// Wall-clock duration of the session, in seconds.
    #[serde(rename = "duration")]
    pub duration_secs: f64,

    /// Number of pro/con arguments generated.
    pub total_turns: u32,

    /// Research text, truncated for transport.
    pub research_context: String,

    /// The judge's per-side analysis.
    #[serde(default)]
    pub analysis: JudgmentAnalysis,
}

/// The terminal artifact of a debate session.
///
/// Built once per session from the judgment and the conversation log.
/// Batch callers receive this directly; streaming consumers receive it
/// inside the terminal `complete` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateResult {
    /// The debated topic.
    pub topic: String,

    /// Declared winner.
    pub winner: Winner,

    /// The judge's explanation.
    pub reasoning: String,

    /// Per-side numeric scores.
    pub score: DebateScores,

    /// Ordered transcript of the generated arguments (pro and con).
    pub transcript: Vec<Message>,

    /// Session summary metadata.
    pub metadata: DebateMetadata,
}

impl DebateResult {
    /// Assembles a result from a judgment, transcript, and metadata.
    pub fn new(
        topic: impl Into<String>,
        judgment: Judgment,
        transcript: Vec<Message>,
        metadata: DebateMetadata,
    ) -> Self {
        Self {
            topic: topic.into(),
            winner: judgment.winner,
            reasoning: judgment.reasoning,
            score: judgment.score,
            transcript,
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judgment::Judgment;

    fn sample_result() -> DebateResult {
        let judgment = Judgment {
            winner: Winner::Pro,
            reasoning: "Better evidence".into(),
            score: DebateScores::new(70, 30),
            analysis: JudgmentAnalysis::default(),
        };
        let transcript = vec![Message::pro("P1"), Message::con("C1")];
        let metadata = DebateMetadata {
            duration_secs: 12.5,
            total_turns: 2,
            research_context: "Some research".into(),
            analysis: JudgmentAnalysis::default(),
        };
        DebateResult::new("Test topic", judgment, transcript, metadata)
    }

    #[test]
    fn test_result_assembly() {
        let result = sample_result();

        assert_eq!(result.topic, "Test topic");
        assert_eq!(result.winner, Winner::Pro);
        assert_eq!(result.score.pro_score, 70);
        assert_eq!(result.transcript.len(), 2);
        assert_eq!(result.metadata.total_turns, 2);
    }

    #[test]
    fn test_result_serialization_roundtrip() {
        let result = sample_result();

        let json = serde_json::to_string(&result).unwrap();
        let parsed: DebateResult = serde_json::from_str(&json).unwrap();

        assert_eq!(result, parsed);
    }

    #[test]
    fn test_metadata_duration_field_name() {
        let result = sample_result();
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["metadata"]["duration"], 12.5);
        assert_eq!(value["winner"], "PRO");
    }
}
