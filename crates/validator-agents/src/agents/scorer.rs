//! Scorer agent: 1–10 correctness score for one candidate.

use std::sync::Arc;

use selection::markers::parse_score;
use selection::{Candidate, Problem, Score};
use tracing::{info, warn};

use crate::errors::JudgeError;
use crate::judge::{JudgeSettings, TextJudge};
use crate::prompts;

/// Assigns a bounded integer score to a candidate.
///
/// A response without "correctness score is N" scores `Score::DEFAULT` and
/// logs a warning; scoring never aborts the pipeline on a parse miss.
pub struct Scorer {
    judge: Arc<dyn TextJudge>,
    settings: JudgeSettings,
}

impl Scorer {
    pub fn new(judge: Arc<dyn TextJudge>, settings: JudgeSettings) -> Self {
        Self { judge, settings }
    }

    pub async fn score(&self, candidate: &Candidate, problem: &Problem) -> Result<Score, JudgeError> {
        let request = self.settings.request(prompts::render_score(candidate, problem))?;
        let response = self.judge.judge(&request).await?;

        let score = match parse_score(&response) {
            Some(score) => score,
            None => {
                warn!(response = %response, "Failed to extract score; using default");
                Score::DEFAULT
            }
        };
        info!(score = score.value(), "Thought scored");
        Ok(score)
    }
}
