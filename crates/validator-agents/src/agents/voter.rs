//! Group voter: which single candidate of a group is best.

use std::sync::Arc;

use selection::markers::parse_vote;
use selection::{Candidate, Problem, VoteOutcome};
use tracing::{info, warn};

use crate::errors::JudgeError;
use crate::judge::{JudgeSettings, TextJudge};
use crate::prompts;

/// Asks the oracle to pick one candidate out of a group labelled from 1.
///
/// A missing or out-of-range vote yields `VoteOutcome::Fallback` (the first
/// candidate wins by default) and logs a warning.
pub struct Voter {
    judge: Arc<dyn TextJudge>,
    settings: JudgeSettings,
}

impl Voter {
    pub fn new(judge: Arc<dyn TextJudge>, settings: JudgeSettings) -> Self {
        Self { judge, settings }
    }

    pub async fn vote(
        &self,
        candidates: &[Candidate],
        problem: &Problem,
    ) -> Result<VoteOutcome, JudgeError> {
        let request = self
            .settings
            .request(prompts::render_vote(candidates, problem))?;
        let response = self.judge.judge(&request).await?;

        let outcome = match parse_vote(&response, candidates.len()) {
            Some(index) => VoteOutcome::Chosen(index),
            None => {
                warn!(
                    response = %response,
                    choices = candidates.len(),
                    "Failed to extract vote; defaulting to first candidate"
                );
                VoteOutcome::Fallback
            }
        };
        info!(vote = outcome.index(), fallback = outcome.is_fallback(), "Group vote complete");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::MockTextJudge;

    async fn vote_of(response: &'static str, group: usize) -> VoteOutcome {
        let mut judge = MockTextJudge::new();
        judge
            .expect_judge()
            .times(1)
            .returning(move |_| Ok(response.to_string()));
        let voter = Voter::new(
            Arc::new(judge),
            JudgeSettings {
                system_role: "role".into(),
                temperature: 0.3,
                max_tokens: 128,
                model: "m".into(),
            },
        );
        let candidates: Vec<Candidate> = (0..group)
            .map(|i| Candidate::new(&format!("candidate {i}")))
            .collect();
        let problem = Problem::new("q");
        voter.vote(&candidates, &problem).await.unwrap()
    }

    #[tokio::test]
    async fn converts_to_zero_based() {
        assert_eq!(vote_of("The best choice is 2", 3).await, VoteOutcome::Chosen(1));
        assert_eq!(vote_of("the best choice is 3", 3).await, VoteOutcome::Chosen(2));
    }

    #[tokio::test]
    async fn out_of_range_falls_back() {
        assert_eq!(vote_of("The best choice is 4", 3).await, VoteOutcome::Fallback);
        assert_eq!(vote_of("The best choice is 0", 3).await, VoteOutcome::Fallback);
    }

    #[tokio::test]
    async fn unparseable_falls_back() {
        assert_eq!(vote_of("Choice two looks good", 3).await, VoteOutcome::Fallback);
    }
}
