//! Judgment agents for the selection pipeline.
//!
//! Each agent renders one prompt kind, sends it through the shared
//! `TextJudge`, and parses the response with `selection::markers`. A missing
//! conclusion marker resolves to the agent's documented default; only judge
//! failures are returned as errors.
//!
//! | Agent        | Output                | Parse-miss default |
//! |--------------|-----------------------|--------------------|
//! | `Verifier`   | `VerificationRecord`  | invalid            |
//! | `Scorer`     | `Score` in `[1, 10]`  | 5                  |
//! | `Comparator` | `ComparisonOutcome`   | `Tie`              |
//! | `Voter`      | `VoteOutcome`         | `Fallback` (0)     |

pub mod comparator;
pub mod scorer;
pub mod verifier;
pub mod voter;

use std::sync::Arc;

use crate::judge::{JudgeSettings, TextJudge};

pub use comparator::Comparator;
pub use scorer::Scorer;
pub use verifier::Verifier;
pub use voter::Voter;

/// The four judgment agents, sharing one oracle and one set of settings.
pub struct JudgePanel {
    pub verifier: Verifier,
    pub scorer: Scorer,
    pub comparator: Comparator,
    pub voter: Voter,
}

impl JudgePanel {
    pub fn new(judge: Arc<dyn TextJudge>, settings: JudgeSettings) -> Self {
        Self {
            verifier: Verifier::new(judge.clone(), settings.clone()),
            scorer: Scorer::new(judge.clone(), settings.clone()),
            comparator: Comparator::new(judge.clone(), settings.clone()),
            voter: Voter::new(judge, settings),
        }
    }
}
