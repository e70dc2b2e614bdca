//! Selection run state machine: explicit stages and legal transition guards.
//!
//! Every run starts at `Verifying` and terminates at `Done` or `Failed`.
//! The orchestrator calls `advance()` between stages; each call checks the
//! edge against the transition table and appends a `TransitionRecord`, so an
//! audit report can replay exactly which stages a run went through.

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    /// Asking the verifier about every candidate.
    Verifying,
    /// Scoring the scoring set.
    Scoring,
    /// Ordering the scoring set by score.
    Ranking,
    /// Pairwise comparison of the top two, plus the group vote when large enough.
    Resolving,
    /// Mapping the winner back to the input and extracting its answer.
    Extracting,
    /// Result produced. Terminal.
    Done,
    /// A judge call failed. Terminal.
    Failed,
}

impl SelectionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for SelectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verifying => write!(f, "Verifying"),
            Self::Scoring => write!(f, "Scoring"),
            Self::Ranking => write!(f, "Ranking"),
            Self::Resolving => write!(f, "Resolving"),
            Self::Extracting => write!(f, "Extracting"),
            Self::Done => write!(f, "Done"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// ```text
/// Verifying  → Scoring | Failed
/// Scoring    → Ranking | Failed
/// Ranking    → Resolving | Extracting | Done | Failed
/// Resolving  → Extracting | Failed
/// Extracting → Done | Failed
/// ```
///
/// `Ranking → Extracting` is the single-member shortcut and `Ranking → Done`
/// the empty-input degenerate result.
fn is_legal_transition(from: SelectionState, to: SelectionState) -> bool {
    use SelectionState::*;

    if to == Failed && !from.is_terminal() {
        return true;
    }

    matches!(
        (from, to),
        (Verifying, Scoring)
            | (Scoring, Ranking)
            | (Ranking, Resolving)
            | (Ranking, Extracting)
            | (Ranking, Done)
            | (Resolving, Extracting)
            | (Extracting, Done)
    )
}

/// A single recorded state transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from: SelectionState,
    pub to: SelectionState,
    /// Milliseconds since the state machine was created.
    pub elapsed_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IllegalTransition {
    pub from: SelectionState,
    pub to: SelectionState,
}

impl fmt::Display for IllegalTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Illegal state transition: {} → {}", self.from, self.to)
    }
}

impl std::error::Error for IllegalTransition {}

pub struct StateMachine {
    current: SelectionState,
    created_at: Instant,
    transitions: Vec<TransitionRecord>,
}

impl StateMachine {
    /// Create a new state machine starting at `Verifying`.
    pub fn new() -> Self {
        Self {
            current: SelectionState::Verifying,
            created_at: Instant::now(),
            transitions: Vec::new(),
        }
    }

    pub fn current(&self) -> SelectionState {
        self.current
    }

    /// Move to `to` if the edge is legal, recording the transition.
    pub fn advance(
        &mut self,
        to: SelectionState,
        reason: Option<&str>,
    ) -> Result<(), IllegalTransition> {
        if !is_legal_transition(self.current, to) {
            return Err(IllegalTransition {
                from: self.current,
                to,
            });
        }

        let record = TransitionRecord {
            from: self.current,
            to,
            elapsed_ms: self.created_at.elapsed().as_millis() as u64,
            reason: reason.map(String::from),
        };

        tracing::debug!(
            from = %self.current,
            to = %to,
            reason = reason.unwrap_or(""),
            "State transition"
        );

        self.transitions.push(record);
        self.current = to;
        Ok(())
    }

    pub fn fail(&mut self, reason: &str) -> Result<(), IllegalTransition> {
        self.advance(SelectionState::Failed, Some(reason))
    }

    pub fn is_terminal(&self) -> bool {
        self.current.is_terminal()
    }

    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    pub fn into_transitions(self) -> Vec<TransitionRecord> {
        self.transitions
    }

    /// One-line history, e.g. `Verifying → Done (3ms, 5 transitions) [Scoring → …]`.
    pub fn summary(&self) -> String {
        let states: Vec<String> = self.transitions.iter().map(|t| t.to.to_string()).collect();
        let mut out = format!(
            "{} → {} ({}ms, {} transitions)",
            SelectionState::Verifying,
            self.current,
            self.created_at.elapsed().as_millis(),
            self.transitions.len(),
        );
        if !states.is_empty() {
            out.push_str(&format!(" [{}]", states.join(" → ")));
        }
        out
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}
