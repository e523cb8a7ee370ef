//! Shared debater behavior: the role trait, side context, and prompt
//! construction from bounded conversation history.

use async_trait::async_trait;

use rostrum_models::{Message, Role};

use crate::config::AgentConfig;
use crate::error::Result;

/// Number of recent messages included in an argument prompt.
pub const DEFAULT_CONTEXT_WINDOW: usize = 10;

/// Side context handed to debaters alongside the conversation history.
#[derive(Debug, Clone, Default)]
pub struct AgentContext {
    /// Research text gathered by the judge before the debate.
    pub research: Option<String>,
}

impl AgentContext {
    /// Context carrying research text.
    pub fn with_research(research: impl Into<String>) -> Self {
        Self {
            research: Some(research.into()),
        }
    }
}

/// A debating role: turns topic + visible history into one argument.
///
/// Implementations are stateless with respect to debate content; they
/// hold only their model configuration and a generator handle.
#[async_trait]
pub trait Debater: Send + Sync {
    /// Which side this debater argues.
    fn role(&self) -> Role;

    /// The model configuration this debater generates with.
    fn config(&self) -> &AgentConfig;

    /// Generates one argument. Generator failure propagates; the caller
    /// decides whether the turn or the session absorbs it.
    async fn generate_argument(
        &self,
        topic: &str,
        history: &[Message],
        context: &AgentContext,
    ) -> Result<String>;
}

/// Renders the most recent `max_history` non-system messages as a
/// textual context window: `ROLE: content` blocks, blank-line
/// separated, oldest first within the window.
pub fn build_conversation_context(history: &[Message], max_history: usize) -> String {
    let start = history.len().saturating_sub(max_history);
    history[start..]
        .iter()
        .filter(|m| m.role != Role::System)
        .map(|m| format!("{}: {}", m.role.to_string().to_uppercase(), m.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Builds the argument prompt for a debating side.
pub(crate) fn build_argument_prompt(
    side: Role,
    topic: &str,
    history: &[Message],
    context: &AgentContext,
) -> String {
    let conversation = build_conversation_context(history, DEFAULT_CONTEXT_WINDOW);

    let (task, opposition, label) = match side {
        Role::Pro => (
            "Your task: Provide a strong PRO argument for this topic. Be persuasive, \
             use evidence, and directly address any CON arguments that have been made.",
            "- Address counterarguments directly",
            "Your PRO argument:",
        ),
        _ => (
            "Your task: Provide a strong CON argument against this topic. Be persuasive, \
             use evidence, and directly address any PRO arguments that have been made.",
            "- Address pro-arguments directly",
            "Your CON argument:",
        ),
    };

    let mut parts = vec![format!("DEBATE TOPIC: {}", topic)];

    if let Some(research) = context.research.as_deref().filter(|r| !r.is_empty()) {
        parts.push("RESEARCH CONTEXT:".to_string());
        parts.push(research.to_string());
    }

    if !conversation.is_empty() {
        parts.push("CONVERSATION HISTORY:".to_string());
        parts.push(conversation);
    }

    parts.push(task.to_string());
    parts.push(format!(
        "Guidelines:\n\
         - Stay focused on the topic\n\
         - Use logical reasoning and evidence\n\
         {}\n\
         - Be respectful but assertive\n\
         - Keep your response concise but comprehensive",
        opposition
    ));
    parts.push(label.to_string());

    parts.join("\n\n")
}
