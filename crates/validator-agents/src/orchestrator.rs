//! Selection Orchestrator: drives one run from raw input to a `SelectionReport`.
//!
//! ```text
//! normalize → Verifying → Scoring → Ranking ─┬─ (0 members) ───────────────→ Done
//!                                            ├─ (1 member) ──→ Extracting → Done
//!                                            └─ (≥2) → Resolving → Extracting → Done
//! ```
//!
//! Verification and scoring fan out over candidates with bounded
//! concurrency (`max_parallel_judgments`, default 1) and always reassemble in
//! input order. Comparison and voting run after scoring, one call each.
//! Any judge failure moves the run to `Failed` and aborts it; parse misses
//! never do.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt, TryStreamExt};
use selection::markers::extract_answer;
use selection::{
    rank_by_score, resolve_winner, Candidate, ComparisonOutcome, Problem, Score,
    ScoringSet, SelectionResult, ValidationInput, VerificationRecord, VoteOutcome,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::agents::JudgePanel;
use crate::config::ValidatorConfig;
use crate::errors::{JudgeError, JudgmentStage, ValidationError};
use crate::judge::{JudgeSettings, RigJudge, TextJudge};
use crate::prompts::PROMPT_VERSION;
use crate::state_machine::{SelectionState, StateMachine, TransitionRecord};

/// Full audit record of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionReport {
    pub result: SelectionResult,
    pub transitions: Vec<TransitionRecord>,
    /// Comparator verdict on the top two, when at least two were scored.
    pub comparison: Option<ComparisonOutcome>,
    /// Group vote, when at least three were scored.
    pub vote: Option<VoteOutcome>,
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
}

pub struct SelectionOrchestrator {
    panel: JudgePanel,
    parallelism: usize,
}

impl SelectionOrchestrator {
    /// Sequential orchestrator over the given judge.
    pub fn new(judge: Arc<dyn TextJudge>, settings: JudgeSettings) -> Self {
        Self {
            panel: JudgePanel::new(judge, settings),
            parallelism: 1,
        }
    }

    /// Allow up to `n` verification/scoring calls in flight. Zero is treated as 1.
    pub fn with_parallelism(mut self, n: usize) -> Self {
        self.parallelism = n.max(1);
        self
    }

    /// Wire a `RigJudge` against the configured endpoint.
    pub fn from_config(config: &ValidatorConfig) -> Result<Self, JudgeError> {
        let judge = RigJudge::from_config(config)?;
        Ok(Self::new(Arc::new(judge), JudgeSettings::from_config(config))
            .with_parallelism(config.max_parallel_judgments))
    }

    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    /// Run the full pipeline on one input.
    pub async fn run(&self, input: &ValidationInput) -> Result<SelectionReport, ValidationError> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let span = info_span!("selection_run", run_id = %run_id);
        self.execute(input, run_id, started_at)
            .instrument(span)
            .await
    }

    async fn execute(
        &self,
        input: &ValidationInput,
        run_id: Uuid,
        started_at: DateTime<Utc>,
    ) -> Result<SelectionReport, ValidationError> {
        let (problem, candidates) = input.normalize();
        if let Some(func_name) = &input.func_name {
            debug!(func_name = %func_name, "Ignoring func_name field");
        }
        info!(
            candidates = candidates.len(),
            prompt_version = PROMPT_VERSION,
            parallelism = self.parallelism,
            "Starting selection run"
        );

        let mut sm = StateMachine::new();

        // Verifying
        let records = self
            .verify_all(&candidates, &problem)
            .await
            .map_err(|e| abort(&mut sm, JudgmentStage::Verification, e))?;

        let valid_thoughts: Vec<String> = records
            .iter()
            .filter(|r| r.is_valid)
            .map(|r| r.candidate.as_str().to_string())
            .collect();
        let verification_details: Vec<String> =
            records.iter().map(|r| r.rationale.clone()).collect();

        let set = ScoringSet::from_verification(&records);
        if set.fell_back() && !set.is_empty() {
            warn!("No valid thoughts found; scoring all candidates");
        }
        step(
            &mut sm,
            SelectionState::Scoring,
            Some(&format!("{} of {} valid", valid_thoughts.len(), records.len())),
        );

        // Scoring
        let scores = self
            .score_all(set.members(), &problem)
            .await
            .map_err(|e| abort(&mut sm, JudgmentStage::Scoring, e))?;
        let score_values: Vec<u8> = scores.iter().map(|s| s.value()).collect();
        step(&mut sm, SelectionState::Ranking, None);

        // Ranking
        if set.is_empty() {
            step(&mut sm, SelectionState::Done, Some("no candidates"));
            info!("No candidates supplied; returning degenerate result");
            return Ok(SelectionReport {
                result: SelectionResult {
                    valid_thoughts,
                    scores: score_values,
                    verification_details,
                    ..SelectionResult::degenerate()
                },
                transitions: sm.into_transitions(),
                comparison: None,
                vote: None,
                run_id,
                started_at,
            });
        }
        let ranked = rank_by_score(&scores);

        // Resolving
        let top_two = match ranked.as_slice() {
            [top, second, ..] => set.get(*top).zip(set.get(*second)),
            _ => None,
        };
        let (comparison, vote) = match top_two {
            Some((first, runner_up)) => {
                step(&mut sm, SelectionState::Resolving, None);
                let comparison = self
                    .panel
                    .comparator
                    .compare(first, runner_up, &problem)
                    .await
                    .map_err(|e| abort(&mut sm, JudgmentStage::Comparison, e))?;

                let vote = if set.needs_vote() {
                    Some(
                        self.panel
                            .voter
                            .vote(set.members(), &problem)
                            .await
                            .map_err(|e| abort(&mut sm, JudgmentStage::Voting, e))?,
                    )
                } else {
                    None
                };
                step(&mut sm, SelectionState::Extracting, None);
                (Some(comparison), vote)
            }
            None => {
                step(&mut sm, SelectionState::Extracting, Some("single candidate"));
                (None, None)
            }
        };

        // Extracting
        let winner = resolve_winner(
            &scores,
            &ranked,
            comparison.unwrap_or(ComparisonOutcome::Tie),
            vote,
        );
        let best_thought = set
            .get(winner)
            .map(|c| c.as_str().to_string())
            .unwrap_or_default();
        let best_thought_index = set.original_index(winner, &candidates).unwrap_or(0);
        let final_answer = extract_answer(&best_thought);
        step(&mut sm, SelectionState::Done, None);

        info!(
            winner = best_thought_index,
            score = score_values.get(winner).copied().unwrap_or_default(),
            "Selected best thought"
        );
        info!(answer = %final_answer, "Final answer");
        debug!(summary = %sm.summary(), "Selection run complete");

        Ok(SelectionReport {
            result: SelectionResult {
                valid_thoughts,
                scores: score_values,
                best_thought,
                best_thought_index,
                verification_details,
                final_answer,
            },
            transitions: sm.into_transitions(),
            comparison,
            vote,
            run_id,
            started_at,
        })
    }

    async fn verify_all(
        &self,
        candidates: &[Candidate],
        problem: &Problem,
    ) -> Result<Vec<VerificationRecord>, JudgeError> {
        stream::iter(candidates)
            .map(|candidate| self.panel.verifier.verify(candidate, problem))
            .buffered(self.parallelism)
            .try_collect()
            .await
    }

    async fn score_all(
        &self,
        members: &[Candidate],
        problem: &Problem,
    ) -> Result<Vec<Score>, JudgeError> {
        stream::iter(members)
            .map(|candidate| self.panel.scorer.score(candidate, problem))
            .buffered(self.parallelism)
            .try_collect()
            .await
    }
}

fn step(sm: &mut StateMachine, to: SelectionState, reason: Option<&str>) {
    if let Err(e) = sm.advance(to, reason) {
        error!(error = %e, "Selection state machine rejected transition");
    }
}

fn abort(sm: &mut StateMachine, stage: JudgmentStage, source: JudgeError) -> ValidationError {
    error!(stage = %stage, error = %source, state = %sm.current(), "Judge call failed; aborting run");
    step(sm, SelectionState::Failed, Some(&source.to_string()));
    ValidationError::judgment(stage, source)
}
