//! Judgment and result types shared by the selection pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::Candidate;

/// One verifier judgment, paired with the candidate it judged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationRecord {
    pub candidate: Candidate,
    pub is_valid: bool,
    /// Full raw oracle response, kept verbatim for audit.
    pub rationale: String,
}

/// Integer quality score in `[1, 10]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Used when the oracle's response carries no parseable score.
    pub const DEFAULT: Score = Score(5);

    /// Clamp any raw value into `[1, 10]`.
    pub fn clamped(raw: u64) -> Self {
        Self(raw.clamp(Self::MIN as u64, Self::MAX as u64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/10", self.0)
    }
}

/// Pairwise comparator verdict for an ordered pair of candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOutcome {
    FirstWins,
    SecondWins,
    /// Explicit "similarly correct" or an unparseable response.
    Tie,
}

impl fmt::Display for ComparisonOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstWins => write!(f, "first_wins"),
            Self::SecondWins => write!(f, "second_wins"),
            Self::Tie => write!(f, "tie"),
        }
    }
}

/// Group voter verdict over a candidate group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "index")]
pub enum VoteOutcome {
    /// 0-based index into the voted group.
    Chosen(usize),
    /// No usable vote; the first candidate wins by default.
    Fallback,
}

impl VoteOutcome {
    pub fn index(self) -> usize {
        match self {
            Self::Chosen(i) => i,
            Self::Fallback => 0,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, Self::Fallback)
    }
}

/// Terminal artifact of one pipeline run.
///
/// Field names are part of the output contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionResult {
    /// Candidates judged valid, in input order.
    pub valid_thoughts: Vec<String>,
    /// Scores aligned with the scoring set (valid subset, or all candidates
    /// when none verified).
    pub scores: Vec<u8>,
    pub best_thought: String,
    /// Position of the winner in the original candidate sequence.
    pub best_thought_index: usize,
    /// One rationale per input candidate, in input order.
    pub verification_details: Vec<String>,
    /// Digit string, or empty when no answer could be extracted.
    pub final_answer: String,
}

impl SelectionResult {
    /// Result for an empty candidate list.
    pub fn degenerate() -> Self {
        Self::default()
    }
}
