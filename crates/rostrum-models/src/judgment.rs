//! Judgment types and lenient parsing of judge responses.
//!
//! The judge model is asked for a fixed JSON shape (winner, reasoning,
//! per-side scores, strengths/weaknesses). Model output is not trusted:
//! [`Judgment::parse`] recovers from fenced output and stray prose, and
//! degrades to a deterministic neutral tie when the response cannot be
//! read as the expected structure. Adjudication never fails past this
//! boundary.

use serde::{Deserialize, Serialize};

/// Declared winner of a debate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Winner {
    /// The pro side won.
    Pro,
    /// The con side won.
    Con,
    /// No winner could be determined.
    Tie,
    /// Judgment failed; scores are not meaningful.
    Error,
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pro => write!(f, "PRO"),
            Self::Con => write!(f, "CON"),
            Self::Tie => write!(f, "TIE"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Numeric scores for each side, 0 to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateScores {
    /// Score awarded to the pro side.
    pub pro_score: u8,
    /// Score awarded to the con side.
    pub con_score: u8,
}

impl DebateScores {
    /// Creates scores, clamping each value to 0..=100.
    pub fn new(pro_score: u8, con_score: u8) -> Self {
        Self {
            pro_score: pro_score.min(100),
            con_score: con_score.min(100),
        }
    }

    /// Neutral 50/50 scores.
    pub fn tied() -> Self {
        Self {
            pro_score: 50,
            con_score: 50,
        }
    }

    /// Zero scores, used for failed judgments.
    pub fn zero() -> Self {
        Self {
            pro_score: 0,
            con_score: 0,
        }
    }
}

/// Strengths and weaknesses the judge observed for each side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgmentAnalysis {
    /// Points where the pro side argued well.
    #[serde(default)]
    pub pro_strengths: Vec<String>,
    /// Points where the pro side argued poorly.
    #[serde(default)]
    pub pro_weaknesses: Vec<String>,
    /// Points where the con side argued well.
    #[serde(default)]
    pub con_strengths: Vec<String>,
    /// Points where the con side argued poorly.
    #[serde(default)]
    pub con_weaknesses: Vec<String>,
}

impl JudgmentAnalysis {
    /// Returns true when no observations were recorded.
    pub fn is_empty(&self) -> bool {
        self.pro_strengths.is_empty()
            && self.pro_weaknesses.is_empty()
            && self.con_strengths.is_empty()
            && self.con_weaknesses.is_empty()
    }
}

/// The judge's verdict on a completed debate. Produced once, immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    /// Declared winner.
    pub winner: Winner,
    /// Explanation of the decision.
    pub reasoning: String,
    /// Per-side numeric scores.
    pub score: DebateScores,
    /// Per-side strengths and weaknesses.
    #[serde(default)]
    pub analysis: JudgmentAnalysis,
}

/// Wire shape the judge model is asked to produce. Every field is
/// optional so that partially well-formed responses are still usable.
#[derive(Deserialize)]
struct RawJudgment {
    winner: Option<String>,
    reasoning: Option<String>,
    score: Option<RawScores>,
    analysis: Option<JudgmentAnalysis>,
}

#[derive(Deserialize)]
struct RawScores {
    pro_score: Option<f64>,
    con_score: Option<f64>,
}

impl Judgment {
    /// Deterministic fallback when a judge response cannot be parsed.
    pub fn parse_fallback() -> Self {
        Self {
            winner: Winner::Tie,
            reasoning: "Unable to determine winner due to parsing error".to_string(),
            score: DebateScores::tied(),
            analysis: JudgmentAnalysis::default(),
        }
    }

    /// Verdict representing a failed judgment phase.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            winner: Winner::Error,
            reasoning: reason.into(),
            score: DebateScores::zero(),
            analysis: JudgmentAnalysis::default(),
        }
    }

    /// Parses a judge model response into a judgment.
    ///
    /// Tolerates markdown code fences and prose around the JSON object,
    /// missing fields, and out-of-range scores (coerced and clamped).
    /// An unreadable response yields [`Judgment::parse_fallback`]; this
    /// function never fails.
    pub fn parse(response: &str) -> Self {
        let Some(body) = extract_json_object(response) else {
            return Self::parse_fallback();
        };

        let Ok(raw) = serde_json::from_str::<RawJudgment>(body) else {
            return Self::parse_fallback();
        };

        let Some(winner) = raw.winner.as_deref().and_then(parse_winner) else {
            return Self::parse_fallback();
        };

        let score = raw
            .score
            .map(|s| DebateScores {
                pro_score: clamp_score(s.pro_score),
                con_score: clamp_score(s.con_score),
            })
            .unwrap_or_else(DebateScores::tied);

        Self {
            winner,
            reasoning: raw.reasoning.unwrap_or_default(),
            score,
            analysis: raw.analysis.unwrap_or_default(),
        }
    }
}

fn parse_winner(s: &str) -> Option<Winner> {
    match s.trim().to_uppercase().as_str() {
        "PRO" => Some(Winner::Pro),
        "CON" => Some(Winner::Con),
        "TIE" | "DRAW" => Some(Winner::Tie),
        _ => None,
    }
}

fn clamp_score(value: Option<f64>) -> u8 {
    value.map_or(50, |v| v.clamp(0.0, 100.0).round() as u8)
}

/// Extracts the outermost `{...}` span from model output, skipping code
/// fences and surrounding prose.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = r#"{
        "winner": "PRO",
        "reasoning": "Stronger evidence",
        "score": {"pro_score": 70, "con_score": 30},
        "analysis": {
            "pro_strengths": ["clear sourcing"],
            "pro_weaknesses": [],
            "con_strengths": ["good rebuttals"],
            "con_weaknesses": ["no data"]
        }
    }"#;

    #[test]
    fn test_parse_well_formed() {
        let judgment = Judgment::parse(WELL_FORMED);

        assert_eq!(judgment.winner, Winner::Pro);
        assert_eq!(judgment.reasoning, "Stronger evidence");
        assert_eq!(judgment.score.pro_score, 70);
        assert_eq!(judgment.score.con_score, 30);
        assert_eq!(judgment.analysis.pro_strengths, vec!["clear sourcing"]);
    }

    #[test]
    fn test_parse_fenced_response() {
        let fenced = format!("Here is my verdict:\n```json\n{}\n```\n", WELL_FORMED);
        let judgment = Judgment::parse(&fenced);

        assert_eq!(judgment.winner, Winner::Pro);
        assert_eq!(judgment.score.pro_score, 70);
    }

    #[test]
    fn test_parse_garbage_falls_back_to_tie() {
        let judgment = Judgment::parse("I think the pro side did better overall.");

        assert_eq!(judgment.winner, Winner::Tie);
        assert_eq!(judgment.score, DebateScores::tied());
        assert!(judgment.analysis.is_empty());
    }

    #[test]
    fn test_parse_fallback_is_deterministic() {
        assert_eq!(Judgment::parse("not json"), Judgment::parse("{broken"));
        assert_eq!(Judgment::parse(""), Judgment::parse_fallback());
    }

    #[test]
    fn test_parse_unknown_winner_falls_back() {
        let judgment = Judgment::parse(r#"{"winner": "MODERATOR"}"#);
        assert_eq!(judgment, Judgment::parse_fallback());
    }

    #[test]
    fn test_parse_clamps_out_of_range_scores() {
        let judgment =
            Judgment::parse(r#"{"winner": "CON", "score": {"pro_score": -10, "con_score": 140}}"#);

        assert_eq!(judgment.winner, Winner::Con);
        assert_eq!(judgment.score.pro_score, 0);
        assert_eq!(judgment.score.con_score, 100);
    }

    #[test]
    fn test_parse_missing_fields_use_defaults() {
        let judgment = Judgment::parse(r#"{"winner": "TIE"}"#);

        assert_eq!(judgment.winner, Winner::Tie);
        assert_eq!(judgment.score, DebateScores::tied());
        assert!(judgment.reasoning.is_empty());
    }

    #[test]
    fn test_winner_serialization_uppercase() {
        assert_eq!(serde_json::to_string(&Winner::Pro).unwrap(), "\"PRO\"");
        let winner: Winner = serde_json::from_str("\"ERROR\"").unwrap();
        assert_eq!(winner, Winner::Error);
    }

    #[test]
    fn test_scores_clamped_on_construction() {
        let scores = DebateScores::new(120, 80);
        assert_eq!(scores.pro_score, 100);
        assert_eq!(scores.con_score, 80);
    }

    #[test]
    fn test_judgment_serialization_roundtrip() {
        let judgment = Judgment::parse(WELL_FORMED);
        let json = serde_json::to_string(&judgment).unwrap();
        let parsed: Judgment = serde_json::from_str(&json).unwrap();
        assert_eq!(judgment, parsed);
    }
}
