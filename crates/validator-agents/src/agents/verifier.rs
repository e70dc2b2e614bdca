//! Verifier agent: valid/invalid judgment of one candidate's reasoning.

use std::sync::Arc;

use selection::markers::parse_validity;
use selection::{Candidate, Problem, VerificationRecord};
use tracing::{debug, info};

use crate::errors::JudgeError;
use crate::judge::{JudgeSettings, TextJudge};
use crate::prompts;

/// Judges whether a candidate's reasoning is sound.
///
/// Validity requires the oracle to say "reasoning is valid" (any case).
/// Everything else, including a hedged conclusion, is recorded as invalid.
/// The raw response is kept verbatim as the rationale.
pub struct Verifier {
    judge: Arc<dyn TextJudge>,
    settings: JudgeSettings,
}

impl Verifier {
    pub fn new(judge: Arc<dyn TextJudge>, settings: JudgeSettings) -> Self {
        Self { judge, settings }
    }

    pub async fn verify(
        &self,
        candidate: &Candidate,
        problem: &Problem,
    ) -> Result<VerificationRecord, JudgeError> {
        let request = self
            .settings
            .request(prompts::render_verification(candidate, problem))?;
        let rationale = self.judge.judge(&request).await?;
        let is_valid = parse_validity(&rationale);

        if is_valid {
            debug!(candidate_chars = candidate.as_str().len(), "Candidate verified valid");
        } else {
            info!(rationale = %rationale, "Candidate judged invalid");
        }

        Ok(VerificationRecord {
            candidate: candidate.clone(),
            is_valid,
            rationale,
        })
    }
}
