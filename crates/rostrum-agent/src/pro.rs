//! Pro agent: argues in favor of the debate topic.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use rostrum_models::{Message, Role};

use crate::agent::{build_argument_prompt, AgentContext, Debater};
use crate::client::{GenerateRequest, TextGenerator};
use crate::config::AgentConfig;
use crate::error::Result;

/// Agent that argues in favor of the debate topic.
pub struct ProAgent {
    config: AgentConfig,
    generator: Arc<dyn TextGenerator>,
    system_prompt: String,
}

impl ProAgent {
    /// Creates a pro agent over the given generator.
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
impl Debater for ProAgent {
    fn role(&self) -> Role {
        Role::Pro
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
        info!(topic, "generating PRO argument");

        let prompt = build_argument_prompt(Role::Pro, topic, history, context);
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
    async fn test_pro_agent_trims_response() {
        let generator = Arc::new(StubGenerator::returning("  A strong case.  \n"));
        let agent = ProAgent::new(AgentConfig::default(), generator, "system");

        let argument = agent
            .generate_argument("Topic", &[], &AgentContext::default())
            .await
            .unwrap();

        assert_eq!(argument, "A strong case.");
    }

    #[tokio::test]
    async fn test_pro_agent_propagates_generator_failure() {
        let generator = Arc::new(StubGenerator::failing("backend down"));
        let agent = ProAgent::new(AgentConfig::default(), generator, "system");

        let result = agent
            .generate_argument("Topic", &[], &AgentContext::default())
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_pro_agent_includes_history_in_prompt() {
        let generator = Arc::new(StubGenerator::returning("ok"));
        let agent = ProAgent::new(AgentConfig::default(), Arc::clone(&generator) as _, "system");

        let history = vec![Message::con("con opening")];
        agent
            .generate_argument("Topic", &history, &AgentContext::default())
            .await
            .unwrap();

        let prompt = generator.last_prompt();
        assert!(prompt.contains("CON: con opening"));
        assert!(prompt.contains("DEBATE TOPIC: Topic"));
    }
}
