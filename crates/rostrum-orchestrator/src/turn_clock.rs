//! Turn and time bookkeeping for a debate session.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use rostrum_models::DebateConfig;

/// Tracks elapsed debate time, the turn count, and per-turn deadlines.
///
/// Pure bookkeeping, no I/O. `current_turn` only increases, by exactly
/// one per [`TurnClock::advance`]; the last-turn instant stays unset
/// until the first turn completes.
#[derive(Debug, Clone)]
pub struct TurnClock {
    config: DebateConfig,
    current_turn: u32,
    session_start: Instant,
    last_turn: Option<Instant>,
}

/// Snapshot of clock state for logging and status reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockStats {
    /// Turns completed so far.
    pub current_turn: u32,
    /// Turns left before the turn limit.
    pub remaining_turns: u32,
    /// Seconds elapsed since the session started.
    pub elapsed_secs: f64,
    /// Seconds left before the time limit.
    pub remaining_secs: f64,
    /// Configured per-turn deadline, in seconds.
    pub turn_timeout_secs: u64,
}

impl TurnClock {
    /// Creates a clock for the given bounds, starting now.
    pub fn new(config: DebateConfig) -> Self {
        debug!(
            max_turns = config.max_turns,
            max_time_secs = config.max_time_secs,
            "turn clock initialized"
        );
        Self {
            config,
            current_turn: 0,
            session_start: Instant::now(),
            last_turn: None,
        }
    }

    /// Turns completed so far.
    pub fn current_turn(&self) -> u32 {
        self.current_turn
    }

    /// Marks a turn complete: increments the count and stamps the
    /// per-turn deadline reference.
    pub fn advance(&mut self) {
        self.current_turn += 1;
        self.last_turn = Some(Instant::now());
        debug!(turn = self.current_turn, "advanced turn");
    }

    /// True once the turn limit or the time limit is reached.
    pub fn is_debate_finished(&self) -> bool {
        if self.current_turn >= self.config.max_turns {
            return true;
        }
        self.session_start.elapsed() >= self.config.max_time()
    }

    /// True once the per-turn deadline has elapsed since the last
    /// completed turn. Always false before the first turn.
    pub fn is_turn_timed_out(&self) -> bool {
        match self.last_turn {
            Some(last) => last.elapsed() >= self.config.turn_timeout(),
            None => false,
        }
    }

    /// Time elapsed since the session started.
    pub fn elapsed(&self) -> Duration {
        self.session_start.elapsed()
    }

    /// Time left before the session limit, clamped at zero.
    pub fn remaining_time(&self) -> Duration {
        self.config.max_time().saturating_sub(self.elapsed())
    }

    /// Turns left before the turn limit, clamped at zero.
    pub fn remaining_turns(&self) -> u32 {
        self.config.max_turns.saturating_sub(self.current_turn)
    }

    /// Snapshot of the clock state.
    pub fn stats(&self) -> ClockStats {
        ClockStats {
            current_turn: self.current_turn,
            remaining_turns: self.remaining_turns(),
            elapsed_secs: self.elapsed().as_secs_f64(),
            remaining_secs: self.remaining_time().as_secs_f64(),
            turn_timeout_secs: self.config.turn_timeout_secs,
        }
    }
}
