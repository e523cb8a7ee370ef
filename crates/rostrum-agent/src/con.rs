//! Con agent: argues against the debate topic.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use rostrum_models::{Message, Role};

use crate::agent::{build_argument_prompt, AgentContext, Debater};
use crate::client::{GenerateRequest, TextGenerator};
use crate::config::AgentConfig;
use crate::error::Result;

/// Agent that argues against the debate topic.
pub struct ConAgent {
    config: AgentConfig,
    generator: Arc<dyn TextGenerator>,
    system_prompt: String,
}

impl ConAgent {
    /// Creates a con agent over the given generator.
    pub fn new(
        config: AgentConfig,
        generator: Arc<dyn TextGenerator>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            config,
            generator,
            system_prompt: system_prompt.into(),
        }
    }
}

#[async_trait]
impl Debater for ConAgent {
    fn role(&self) -> Role {
        Role::Con
    }

    fn config(&self) -> &AgentConfig {
        &self.config
    }

    async fn generate_argument(
        &self,
        topic: &str,
        history: &[Message],
        context: &AgentContext,
    ) -> Result<String> {
        info!(topic, "generating CON argument");

        let prompt = build_argument_prompt(Role::Con, topic, history, context);
        let request = GenerateRequest {
            prompt,
            system_prompt: Some(self.system_prompt.clone()),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self.generator.generate(&request).await?;
        Ok(response.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubGenerator;

    #[tokio::test]
    async fn test_con_agent_role_and_prompt() {
        let generator = Arc::new(StubGenerator::returning("A counter-case."));
        let agent = ConAgent::new(
            AgentConfig::default(),
            Arc::clone(&generator) as _,
            "system",
        );

        assert_eq!(agent.role(), Role::Con);

        let argument = agent
            .generate_argument("Topic", &[Message::pro("p1")], &AgentContext::default())
            .await
            .unwrap();

        assert_eq!(argument, "A counter-case.");
        let prompt = generator.last_prompt();
        assert!(prompt.contains("strong CON argument"));
        assert!(prompt.ends_with("Your CON argument:"));
    }

    #[tokio::test]
    async fn test_con_agent_research_context() {
        let generator = Arc::new(StubGenerator::returning("ok"));
        let agent = ConAgent::new(
            AgentConfig::default(),
            Arc::clone(&generator) as _,
            "system",
        );

        let context = AgentContext::with_research("research notes");
        agent
            .generate_argument("Topic", &[], &context)
            .await
            .unwrap();

        assert!(generator.last_prompt().contains("research notes"));
    }
}
