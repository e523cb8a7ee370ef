//! The debate session: three-phase protocol over one clock and one log.
//!
//! A session exclusively owns its turn clock, conversation log, and
//! role agents. Phases and turns execute strictly sequentially; the
//! only suspension points are the external LLM/search calls. Multiple
//! sessions can run concurrently, each with its own state.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use rostrum_agent::{
    AgentContext, ConAgent, Debater, JudgeAgent, LlmClient, ProAgent, PromptLibrary,
    WebSearchTool,
};
use rostrum_memory::ConversationLog;
use rostrum_models::{DebateConfig, DebateMetadata, DebateResult, Judgment, Message, Role};

use crate::error::Result;
use crate::event::DebateEvent;
use crate::phase::DebatePhase;
use crate::settings::Settings;
use crate::turn_clock::TurnClock;

/// Inter-turn pause in batch mode (rate-limit courtesy).
const BATCH_TURN_PAUSE: Duration = Duration::from_secs(1);

/// Lighter inter-turn pause while streaming.
const STREAM_TURN_PAUSE: Duration = Duration::from_millis(100);

/// Research text length retained in result metadata, in characters.
const RESEARCH_PREVIEW_CHARS: usize = 500;

/// Buffered events before a slow stream consumer applies backpressure.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Orchestrates one complete debate: research, alternating argument
/// generation, and judgment, producing a [`DebateResult`].
pub struct DebateSession {
    id: Uuid,
    clock: TurnClock,
    log: ConversationLog,
    pro: ProAgent,
    con: ConAgent,
    judge: JudgeAgent,
    phase: DebatePhase,
    turn_pause: Option<Duration>,
}

impl DebateSession {
    /// Creates a session from explicit parts. Useful for substituting
    /// stub generators in tests; production code usually goes through
    /// [`DebateSession::from_settings`].
    pub fn new(config: DebateConfig, pro: ProAgent, con: ConAgent, judge: JudgeAgent) -> Self {
        Self {
            id: Uuid::new_v4(),
            clock: TurnClock::new(config),
            log: ConversationLog::new(),
            pro,
            con,
            judge,
            phase: DebatePhase::Research,
            turn_pause: None,
        }
    }

    /// Builds a session with real LLM clients and web search from
    /// settings. Fails fast on a missing provider credential, before
    /// any session work begins.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let prompts = match &settings.prompts_dir {
            Some(dir) => PromptLibrary::with_dir(dir),
            None => PromptLibrary::builtin(),
        };

        let pro_client = Arc::new(LlmClient::new(
            settings.agents.pro.clone(),
            &settings.api_keys,
        )?);
        let con_client = Arc::new(LlmClient::new(
            settings.agents.con.clone(),
            &settings.api_keys,
        )?);
        let judge_client = Arc::new(LlmClient::new(
            settings.agents.judge.clone(),
            &settings.api_keys,
        )?);
        let search = Arc::new(WebSearchTool::new(
            settings.search.clone(),
            settings.api_keys.clone(),
        ));

        let pro = ProAgent::new(
            settings.agents.pro.clone(),
            pro_client,
            prompts.system_prompt(Role::Pro),
        );
        let con = ConAgent::new(
            settings.agents.con.clone(),
            con_client,
            prompts.system_prompt(Role::Con),
        );
        let judge = JudgeAgent::new(
            settings.agents.judge.clone(),
            judge_client,
            search,
            prompts.system_prompt(Role::Judge),
        );

        Ok(Self::new(settings.debate.clone(), pro, con, judge))
    }

    /// Unique identifier of this session.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The phase the session is currently in.
    pub fn phase(&self) -> DebatePhase {
        self.phase
    }

    /// Read access to the conversation log.
    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// Overrides the inter-turn pause. The pause is a rate-limit
    /// courtesy toward the vendors; tests set it to zero.
    pub fn with_turn_pause(mut self, pause: Duration) -> Self {
        self.turn_pause = Some(pause);
        self
    }

    /// Runs the debate to completion and returns the result.
    ///
    /// Phase failures degrade into the result rather than erroring:
    /// research falls back to placeholder text, a failed turn ends the
    /// debate early, and a failed judgment yields an `ERROR` verdict.
    pub async fn run(&mut self, topic: &str) -> DebateResult {
        self.run_inner(topic, None).await
    }

    /// Runs the debate while emitting an ordered, finite event stream:
    /// phase transitions and messages as they occur, then exactly one
    /// terminal `Complete` (or `Error`) event.
    ///
    /// Consumes the session; a stream is not restartable. Dropping the
    /// receiver cancels the session at its next suspension point.
    pub fn stream(mut self, topic: impl Into<String>) -> mpsc::Receiver<DebateEvent> {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let topic = topic.into();

        tokio::spawn(async move {
            let result = self.run_inner(&topic, Some(&tx)).await;
            let _ = tx.send(DebateEvent::Complete { result }).await;
        });

        rx
    }

    async fn run_inner(
        &mut self,
        topic: &str,
        events: Option<&mpsc::Sender<DebateEvent>>,
    ) -> DebateResult {
        let started = Instant::now();
        info!(session = %self.id, topic, "starting debate");

        self.enter_phase(DebatePhase::Research, events).await;
        let research = self.research_phase(topic, events).await;

        self.enter_phase(DebatePhase::Debate, events).await;
        self.debate_phase(topic, &research, events).await;

        self.enter_phase(DebatePhase::Judgment, events).await;
        let judgment = self.judgment_phase(topic, events).await;

        self.phase = DebatePhase::Done;
        let result = self.assemble_result(topic, judgment, &research, started.elapsed());
        info!(
            session = %self.id,
            winner = %result.winner,
            turns = result.metadata.total_turns,
            "debate completed"
        );
        result
    }

    async fn enter_phase(&mut self, phase: DebatePhase, events: Option<&mpsc::Sender<DebateEvent>>) {
        info!(session = %self.id, phase = %phase, "entering phase");
        self.phase = phase;
        if let Some(tx) = events {
            let _ = tx.send(DebateEvent::Phase { phase }).await;
        }
    }

    /// True when a stream consumer existed but has gone away. Batch
    /// runs (no event channel) are never abandoned.
    fn abandoned(&self, events: Option<&mpsc::Sender<DebateEvent>>) -> bool {
        events.is_some_and(|tx| tx.is_closed())
    }

    async fn push_message(&mut self, message: Message, events: Option<&mpsc::Sender<DebateEvent>>) {
        if let Some(tx) = events {
            let _ = tx
                .send(DebateEvent::Message {
                    message: message.clone(),
                })
                .await;
        }
        self.log.push(message);
    }

    /// Phase 1: the judge researches the topic. Research failure never
    /// prevents the transition to the debate phase; the judge degrades
    /// its output to a placeholder internally.
    async fn research_phase(
        &mut self,
        topic: &str,
        events: Option<&mpsc::Sender<DebateEvent>>,
    ) -> String {
        let research = self.judge.research(topic).await;

        let marker = Message::system(format!("Research completed for topic: {}", topic))
            .with_metadata("phase", json!("research"))
            .with_metadata("research_context", json!(research.clone()));
        self.push_message(marker, events).await;

        research
    }

    /// Phase 2: pro and con alternate until a bound is hit. A failed
    /// turn ends the loop, not the session.
    async fn debate_phase(
        &mut self,
        topic: &str,
        research: &str,
        events: Option<&mpsc::Sender<DebateEvent>>,
    ) {
        let context = AgentContext::with_research(research);
        let pause = self
            .turn_pause
            .unwrap_or(if events.is_some() {
                STREAM_TURN_PAUSE
            } else {
                BATCH_TURN_PAUSE
            });
        let mut side = Role::Pro;

        while !self.clock.is_debate_finished() {
            if self.clock.is_turn_timed_out() {
                warn!(session = %self.id, "turn timeout reached, ending debate");
                break;
            }
            if self.abandoned(events) {
                warn!(session = %self.id, "stream consumer gone, abandoning debate");
                break;
            }

            let history = self.log.conversation_history(None);
            let (outcome, config) = match side {
                Role::Pro => (
                    self.pro.generate_argument(topic, &history, &context).await,
                    self.pro.config(),
                ),
                _ => (
                    self.con.generate_argument(topic, &history, &context).await,
                    self.con.config(),
                ),
            };

            let argument = match outcome {
                Ok(argument) => argument,
                Err(e) => {
                    warn!(session = %self.id, error = %e, "debate turn failed, ending debate");
                    break;
                }
            };

            info!(
                session = %self.id,
                turn = self.clock.current_turn(),
                side = %side,
                chars = argument.len(),
                "turn completed"
            );

            let message = Message::new(side, argument)
                .with_metadata("turn", json!(self.clock.current_turn()))
                .with_metadata(
                    "agent_config",
                    json!({
                        "model": config.model.clone(),
                        "provider": config.provider.to_string(),
                    }),
                );
            self.push_message(message, events).await;

            self.clock.advance();
            side = side.opponent();

            if !pause.is_zero() {
                tokio::time::sleep(pause).await;
            }
        }
    }

    /// Phase 3: the judge scores the debate. A failed judgment degrades
    /// to an `ERROR` verdict with zero scores.
    async fn judgment_phase(
        &mut self,
        topic: &str,
        events: Option<&mpsc::Sender<DebateEvent>>,
    ) -> Judgment {
        if self.abandoned(events) {
            return Judgment::failed("Session abandoned by stream consumer");
        }

        let history = self.log.debate_messages(None);

        let judgment = match self.judge.adjudicate(topic, &history).await {
            Ok(judgment) => judgment,
            Err(e) => {
                warn!(session = %self.id, error = %e, "judgment phase failed");
                Judgment::failed(format!("Judgment failed: {}", e))
            }
        };

        let marker = Message::system(format!("Judgment: {} wins", judgment.winner))
            .with_metadata("phase", json!("judgment"))
            .with_metadata(
                "judgment",
                serde_json::to_value(&judgment).unwrap_or_default(),
            );
        self.push_message(marker, events).await;

        judgment
    }

    fn assemble_result(
        &self,
        topic: &str,
        judgment: Judgment,
        research: &str,
        elapsed: Duration,
    ) -> DebateResult {
        let transcript = self.log.debate_messages(None);
        let metadata = DebateMetadata {
            duration_secs: elapsed.as_secs_f64(),
            total_turns: transcript.len() as u32,
            research_context: truncate_chars(research, RESEARCH_PREVIEW_CHARS),
            analysis: judgment.analysis.clone(),
        };
        DebateResult::new(topic, judgment, transcript, metadata)
    }
}

/// Truncates to `max` characters, appending an ellipsis when trimmed.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max).collect();
    format!("{}...", truncated)
}
