//! Error taxonomy for the validation pipeline.
//!
//! Only two things can abort a run:
//!
//! | Error                         | Raised when                                        |
//! |-------------------------------|----------------------------------------------------|
//! | `ValidationError::InputShape` | problem/candidate payload is malformed (pre-judge) |
//! | `ValidationError::Judgment`   | a judge call itself fails (backend, timeout)       |
//!
//! Oracle responses that lack the expected conclusion marker are *not*
//! errors: each agent resolves them to a documented default and logs a
//! warning.

use std::fmt;
use std::time::Duration;

use selection::InputError;
use thiserror::Error;

/// Failure of a single call to the judgment oracle.
#[derive(Debug, Error)]
pub enum JudgeError {
    /// Network or inference backend failure.
    #[error("Judge backend failure: {0}")]
    Backend(String),

    /// The caller-supplied deadline expired before the oracle answered.
    #[error("Judge call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Judge prompt is empty")]
    EmptyPrompt,

    #[error("Judge temperature must be in [0, 1], got {0}")]
    InvalidTemperature(f64),

    /// Judge client could not be constructed from configuration.
    #[error("Judge configuration error: {0}")]
    Configuration(String),
}

/// Pipeline stage a judgment failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JudgmentStage {
    Verification,
    Scoring,
    Comparison,
    Voting,
}

impl fmt::Display for JudgmentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verification => write!(f, "verification"),
            Self::Scoring => write!(f, "scoring"),
            Self::Comparison => write!(f, "comparison"),
            Self::Voting => write!(f, "voting"),
        }
    }
}

/// Unified error type for a selection run.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Input rejected before any judgment call was made.
    #[error("Invalid input: {0}")]
    InputShape(#[from] InputError),

    /// A judge call failed; the run is aborted.
    #[error("Judgment failed during {stage}: {source}")]
    Judgment {
        stage: JudgmentStage,
        #[source]
        source: JudgeError,
    },
}

impl ValidationError {
    pub fn judgment(stage: JudgmentStage, source: JudgeError) -> Self {
        Self::Judgment { stage, source }
    }

    /// Stage that failed, for judgment failures.
    pub fn stage(&self) -> Option<JudgmentStage> {
        match self {
            Self::Judgment { stage, .. } => Some(*stage),
            Self::InputShape(_) => None,
        }
    }
}
