//! Pairwise comparator: which of two candidates is more correct.

use std::sync::Arc;

use selection::markers::parse_comparison;
use selection::{Candidate, ComparisonOutcome, Problem};
use tracing::info;

use crate::errors::JudgeError;
use crate::judge::{JudgeSettings, TextJudge};
use crate::prompts;

/// Judges an ordered pair. An explicit "similarly correct" and any
/// unparseable response both come back as `ComparisonOutcome::Tie`.
pub struct Comparator {
    judge: Arc<dyn TextJudge>,
    settings: JudgeSettings,
}

impl Comparator {
    pub fn new(judge: Arc<dyn TextJudge>, settings: JudgeSettings) -> Self {
        Self { judge, settings }
    }

    pub async fn compare(
        &self,
        first: &Candidate,
        second: &Candidate,
        problem: &Problem,
    ) -> Result<ComparisonOutcome, JudgeError> {
        let request = self
            .settings
            .request(prompts::render_comparison(first, second, problem))?;
        let response = self.judge.judge(&request).await?;
        let outcome = parse_comparison(&response);
        info!(outcome = %outcome, "Pairwise comparison complete");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::MockTextJudge;

    async fn outcome_of(response: &'static str) -> ComparisonOutcome {
        let mut judge = MockTextJudge::new();
        judge
            .expect_judge()
            .withf(|req| req.prompt.contains("Solution 1:\nA") && req.prompt.contains("Solution 2:\nB"))
            .times(1)
            .returning(move |_| Ok(response.to_string()));
        let comparator = Comparator::new(
            Arc::new(judge),
            JudgeSettings {
                system_role: "role".into(),
                temperature: 0.3,
                max_tokens: 128,
                model: "m".into(),
            },
        );
        let problem = Problem::new("q");
        comparator
            .compare(&Candidate::new("A"), &Candidate::new("B"), &problem)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn first_and_second_wins() {
        assert_eq!(
            outcome_of("...\nThe more correct solution is 1").await,
            ComparisonOutcome::FirstWins
        );
        assert_eq!(
            outcome_of("...\nThe more correct solution is 2").await,
            ComparisonOutcome::SecondWins
        );
    }

    #[tokio::test]
    async fn similar_or_unparseable_is_tie() {
        assert_eq!(
            outcome_of("Both solutions are similarly correct").await,
            ComparisonOutcome::Tie
        );
        assert_eq!(outcome_of("hmm").await, ComparisonOutcome::Tie);
    }
}
