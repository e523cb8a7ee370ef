//! System prompt templates for the three debate roles.
//!
//! Prompts can be overridden by dropping `pro.txt`, `con.txt`, or
//! `judge.txt` into a prompts directory; otherwise the built-in
//! defaults are used.

use std::path::{Path, PathBuf};

use tracing::debug;

use rostrum_models::Role;

/// Built-in system prompt for the pro debater.
pub const PRO_SYSTEM_PROMPT: &str = "\
You are a skilled debater arguing in FAVOR of the given topic.

Your role:
- Present strong, evidence-based arguments supporting the PRO position
- Use logical reasoning, facts, and credible sources
- Address counterarguments effectively
- Maintain a professional and persuasive tone
- Stay focused on the debate topic

Debate guidelines:
- Be respectful but assertive in your arguments
- Use specific examples and evidence when possible
- Structure your arguments clearly
- Acknowledge valid points from the opposition while reinforcing your position
- Avoid personal attacks or inflammatory language

Remember: You are arguing FOR the topic. Make the strongest possible case for your position.";

/// Built-in system prompt for the con debater.
pub const CON_SYSTEM_PROMPT: &str = "\
You are a skilled debater arguing AGAINST the given topic.

Your role:
- Present strong, evidence-based arguments opposing the topic
- Use logical reasoning, facts, and credible sources
- Address pro-arguments effectively
- Maintain a professional and persuasive tone
- Stay focused on the debate topic

Debate guidelines:
- Be respectful but assertive in your arguments
- Use specific examples and evidence when possible
- Structure your arguments clearly
- Acknowledge valid points from the opposition while reinforcing your position
- Avoid personal attacks or inflammatory language

Remember: You are arguing AGAINST the topic. Make the strongest possible case against the position.";

/// Built-in system prompt for the judge.
pub const JUDGE_SYSTEM_PROMPT: &str = "\
You are an impartial debate judge with expertise in critical thinking and argumentation.

Your responsibilities:
1. Research topics thoroughly using available tools
2. Evaluate debates based on objective criteria
3. Provide fair and balanced judgments
4. Explain your reasoning clearly

Evaluation criteria:
- Strength and quality of arguments
- Use of evidence and credible sources
- Logical reasoning and coherence
- Addressing of counterarguments
- Overall persuasiveness and impact

Guidelines:
- Remain completely impartial and objective
- Base judgments on argument quality, not personal beliefs
- Provide detailed reasoning for all decisions
- Consider both sides fairly
- Focus on facts, logic, and evidence";

/// Resolves system prompts for roles, preferring template files from a
/// prompts directory over the built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct PromptLibrary {
    dir: Option<PathBuf>,
}

impl PromptLibrary {
    /// A library serving only the built-in prompts.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// A library that checks `dir` for per-role template files first.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// The system prompt for a role.
    ///
    /// Looks for `<dir>/<role>.txt` when a directory is configured and
    /// falls back to the built-in prompt if the file is absent or
    /// unreadable. System-role messages are session-generated and have
    /// no prompt; the judge prompt is returned for that case.
    pub fn system_prompt(&self, role: Role) -> String {
        if let Some(dir) = &self.dir {
            if let Some(template) = read_template(dir, role) {
                return template;
            }
        }

        match role {
            Role::Pro => PRO_SYSTEM_PROMPT.to_string(),
            Role::Con => CON_SYSTEM_PROMPT.to_string(),
            Role::Judge | Role::System => JUDGE_SYSTEM_PROMPT.to_string(),
        }
    }
}

fn read_template(dir: &Path, role: Role) -> Option<String> {
    let path = dir.join(format!("{}.txt", role));
    let content = std::fs::read_to_string(&path).ok()?;
    debug!(path = %path.display(), "loaded prompt template");
    let trimmed = content.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_prompts_per_role() {
        let library = PromptLibrary::builtin();

        assert!(library.system_prompt(Role::Pro).contains("FAVOR"));
        assert!(library.system_prompt(Role::Con).contains("AGAINST"));
        assert!(library.system_prompt(Role::Judge).contains("impartial"));
    }

    #[test]
    fn test_missing_dir_falls_back_to_builtin() {
        let library = PromptLibrary::with_dir("/nonexistent/prompts");
        assert_eq!(library.system_prompt(Role::Pro), PRO_SYSTEM_PROMPT);
    }

    #[test]
    fn test_template_file_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("con.txt"), "Custom con prompt.\n").unwrap();

        let library = PromptLibrary::with_dir(dir.path());

        assert_eq!(library.system_prompt(Role::Con), "Custom con prompt.");
        // Other roles still use the built-ins.
        assert_eq!(library.system_prompt(Role::Pro), PRO_SYSTEM_PROMPT);
    }

    #[test]
    fn test_empty_template_file_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("judge.txt"), "  \n").unwrap();

        let library = PromptLibrary::with_dir(dir.path());
        assert_eq!(library.system_prompt(Role::Judge), JUDGE_SYSTEM_PROMPT);
    }
}
