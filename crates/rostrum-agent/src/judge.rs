//! Judge agent: researches the topic before the debate and scores it
//! afterward.

use std::sync::Arc;

use tracing::{info, warn};

use rostrum_models::{Judgment, Message, Role};

use crate::client::{GenerateRequest, TextGenerator};
use crate::config::AgentConfig;
use crate::error::Result;
use crate::search::SearchProvider;

/// JSON shape the judge model is asked to fill in.
const JUDGMENT_FORMAT: &str = r#"{
    "winner": "PRO" or "CON",
    "reasoning": "Detailed explanation of your decision",
    "score": {
        "pro_score": 0-100,
        "con_score": 0-100
    },
    "analysis": {
        "pro_strengths": ["strength1", "strength2"],
        "pro_weaknesses": ["weakness1", "weakness2"],
        "con_strengths": ["strength1", "strength2"],
        "con_weaknesses": ["weakness1", "weakness2"]
    }
}"#;

/// System prompt used only for the research summarization call.
const RESEARCH_SYSTEM_PROMPT: &str = "\
You are a research assistant. Analyze the provided search results and create \
a balanced, informative summary that will help debaters understand the key \
aspects of the topic.

Focus on:
- Key facts and statistics
- Main arguments on both sides
- Important context and background
- Credible sources and evidence

Be objective and comprehensive.";

/// Agent that researches topics and judges debates.
pub struct JudgeAgent {
    config: AgentConfig,
    generator: Arc<dyn TextGenerator>,
    search: Arc<dyn SearchProvider>,
    system_prompt: String,
}

impl JudgeAgent {
    /// Creates a judge over the given generator and search provider.
    pub fn new(
        config: AgentConfig,
        generator: Arc<dyn TextGenerator>,
        search: Arc<dyn SearchProvider>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            config,
            generator,
            search,
            system_prompt: system_prompt.into(),
        }
    }

    /// The model configuration this judge generates with.
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// The judge's role tag.
    pub fn role(&self) -> Role {
        Role::Judge
    }

    /// Researches the debate topic: web search, then an LLM synthesis of
    /// the results into a balanced summary.
    ///
    /// Degrades rather than fails: if summarization cannot be completed
    /// the returned text explains the failure, and the debate proceeds
    /// without blocking.
    pub async fn research(&self, topic: &str) -> String {
        info!(topic, "researching topic");

        let results = self.search.search(topic).await;

        let mut document = format!("RESEARCH RESULTS FOR: {}\n{}\n", topic, "=".repeat(50));
        for (index, result) in results.iter().enumerate() {
            document.push_str(&format!(
                "\n{}. {}\n   Source: {}\n   Summary: {}\n",
                index + 1,
                result.title,
                result.url,
                result.snippet
            ));
        }

        let summary_prompt = format!(
            "Based on these search results, provide a comprehensive research summary \
             for the debate topic: \"{}\"\n\n{}\n\n\
             Create a balanced summary that covers:\n\
             1. Background and context\n\
             2. Key arguments FOR the topic\n\
             3. Key arguments AGAINST the topic\n\
             4. Important facts and statistics\n\
             5. Notable sources and references\n\n\
             Research Summary:",
            topic, document
        );

        let request = GenerateRequest {
            prompt: summary_prompt,
            system_prompt: Some(RESEARCH_SYSTEM_PROMPT.to_string()),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        match self.generator.generate(&request).await {
            Ok(summary) => format!("{}\n\nRESEARCH SUMMARY:\n{}", document, summary.trim()),
            Err(e) => {
                warn!(error = %e, "research summarization failed");
                format!(
                    "Research could not be completed for topic: {}. Error: {}",
                    topic, e
                )
            }
        }
    }

    /// Scores a completed debate from its pro/con arguments.
    ///
    /// The model is asked for a fixed JSON verdict; malformed output
    /// degrades to the neutral-tie fallback inside [`Judgment::parse`].
    /// Generator failure propagates so the session can degrade the
    /// judgment phase as a whole.
    pub async fn adjudicate(&self, topic: &str, history: &[Message]) -> Result<Judgment> {
        info!(topic, "judging debate");

        let mut transcript = format!("DEBATE TOPIC: {}\n{}\n", topic, "=".repeat(50));
        for message in history.iter().filter(|m| m.role.is_debater()) {
            transcript.push_str(&format!(
                "\n{} ARGUMENT:\n{}\n",
                message.role.to_string().to_uppercase(),
                message.content
            ));
        }

        let judge_prompt = format!(
            "Analyze this complete debate transcript and provide your judgment:\n\n{}\n\n\
             Evaluate based on:\n\
             1. Strength of arguments and evidence\n\
             2. Logical reasoning and coherence\n\
             3. Addressing of counterarguments\n\
             4. Use of credible sources and facts\n\
             5. Overall persuasiveness\n\n\
             Provide your judgment in the following JSON format:\n{}\n\n\
             Your judgment:",
            transcript, JUDGMENT_FORMAT
        );

        let request = GenerateRequest {
            prompt: judge_prompt,
            system_prompt: Some(self.system_prompt.clone()),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self.generator.generate(&request).await?;
        Ok(Judgment::parse(&response))
    }
}
