//! Score ranking and winner resolution.
//!
//! The oracle-facing stages produce verdicts, scores, a pairwise comparison
//! and (for larger groups) a vote. The rules that combine them into a single
//! winner are deterministic and live here:
//!
//! ```text
//! scoring set  = valid subset, or every candidate when none verified
//! ranked       = scoring-set indices by score, descending, stable, top 3
//! pick         = ranked[1] if comparator says SecondWins, else ranked[0]
//! vote (≥ 3)   = overrides pick iff vote != pick && score[vote] >= score[pick]
//! ```

use tracing::debug;

use crate::input::Candidate;
use crate::types::{ComparisonOutcome, Score, VerificationRecord, VoteOutcome};

/// Number of top-ranked candidates carried into resolution.
pub const TOP_K: usize = 3;

/// Minimum scoring-set size at which the group vote cross-checks the
/// comparator.
pub const VOTE_MIN_CANDIDATES: usize = 3;

/// The candidates actually scored in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringSet {
    members: Vec<Candidate>,
    /// True when nothing verified and every candidate was kept.
    fell_back: bool,
}

impl ScoringSet {
    /// Choose the scoring set from verifier output: the valid subset in input
    /// order, or the full candidate list when the subset is empty.
    pub fn from_verification(records: &[VerificationRecord]) -> Self {
        let valid: Vec<Candidate> = records
            .iter()
            .filter(|r| r.is_valid)
            .map(|r| r.candidate.clone())
            .collect();

        if valid.is_empty() {
            debug!(
                candidates = records.len(),
                "No candidate verified; scoring every candidate"
            );
            Self {
                members: records.iter().map(|r| r.candidate.clone()).collect(),
                fell_back: true,
            }
        } else {
            Self {
                members: valid,
                fell_back: false,
            }
        }
    }

    pub fn members(&self) -> &[Candidate] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn fell_back(&self) -> bool {
        self.fell_back
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.members.get(index)
    }

    /// Whether the group vote runs for this set.
    pub fn needs_vote(&self) -> bool {
        self.members.len() >= VOTE_MIN_CANDIDATES
    }

    /// Position of the member at `index` in the original candidate sequence.
    ///
    /// Candidates are identified by content, so this is the first original
    /// position holding the same normalized text.
    pub fn original_index(&self, index: usize, original: &[Candidate]) -> Option<usize> {
        let member = self.members.get(index)?;
        original.iter().position(|c| c == member)
    }
}

/// Indices of the top `TOP_K` scores, highest first.
///
/// The sort is stable, so equal scores keep their input order and the
/// earlier candidate ranks higher.
pub fn rank_by_score(scores: &[Score]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..scores.len()).collect();
    indices.sort_by(|&a, &b| scores[b].cmp(&scores[a]));
    indices.truncate(TOP_K);
    indices
}

/// Combine the comparator verdict and optional vote into a winning
/// scoring-set index.
///
/// `ranked` is the output of [`rank_by_score`]. With fewer than two ranked
/// entries the top entry (or 0) wins and `comparison`/`vote` are ignored.
pub fn resolve_winner(
    scores: &[Score],
    ranked: &[usize],
    comparison: ComparisonOutcome,
    vote: Option<VoteOutcome>,
) -> usize {
    let (top, second) = match ranked {
        [top, second, ..] => (*top, *second),
        [only] => return *only,
        [] => return 0,
    };

    let pick = match comparison {
        ComparisonOutcome::SecondWins => second,
        ComparisonOutcome::FirstWins | ComparisonOutcome::Tie => top,
    };

    let Some(vote) = vote else {
        return pick;
    };

    let voted = vote.index();
    match (scores.get(voted), scores.get(pick)) {
        (Some(voted_score), Some(pick_score)) if voted != pick && voted_score >= pick_score => {
            debug!(
                pick,
                voted,
                voted_score = voted_score.value(),
                pick_score = pick_score.value(),
                "Vote overrides comparator pick"
            );
            voted
        }
        _ => pick,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(values: &[u64]) -> Vec<Score> {
        values.iter().map(|v| Score::clamped(*v)).collect()
    }

    fn record(text: &str, is_valid: bool) -> VerificationRecord {
        VerificationRecord {
            candidate: Candidate::new(text),
            is_valid,
            rationale: String::new(),
        }
    }

    #[test]
    fn test_scoring_set_prefers_valid_subset() {
        let records = vec![record("a", false), record("b", true), record("c", true)];
        let set = ScoringSet::from_verification(&records);
        assert!(!set.fell_back());
        let texts: Vec<&str> = set.members().iter().map(|c| c.as_str()).collect();
        assert_eq!(texts, vec!["b", "c"]);
    }

    #[test]
    fn test_scoring_set_falls_back_to_all() {
        let records = vec![record("a", false), record("b", false)];
        let set = ScoringSet::from_verification(&records);
        assert!(set.fell_back());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_scoring_set_empty_input() {
        let set = ScoringSet::from_verification(&[]);
        assert!(set.is_empty());
        assert!(!set.needs_vote());
    }

    #[test]
    fn test_original_index_maps_through_filter() {
        let original = vec![Candidate::new("a"), Candidate::new("b"), Candidate::new("c")];
        let records = vec![record("a", false), record("b", false), record("c", true)];
        let set = ScoringSet::from_verification(&records);
        assert_eq!(set.original_index(0, &original), Some(2));
        assert_eq!(set.original_index(1, &original), None);
    }

    #[test]
    fn test_original_index_duplicates_resolve_to_first() {
        let original = vec![Candidate::new("x"), Candidate::new("y"), Candidate::new("x")];
        let records = vec![record("x", false), record("y", true), record("x", true)];
        let set = ScoringSet::from_verification(&records);
        assert_eq!(set.original_index(1, &original), Some(0));
    }

    #[test]
    fn test_rank_descending_stable_top_three() {
        let s = scores(&[5, 9, 7, 9, 2]);
        assert_eq!(rank_by_score(&s), vec![1, 3, 2]);
    }

    #[test]
    fn test_rank_small_sets() {
        assert_eq!(rank_by_score(&scores(&[4, 8])), vec![1, 0]);
        assert_eq!(rank_by_score(&scores(&[4])), vec![0]);
        assert!(rank_by_score(&[]).is_empty());
    }

    #[test]
    fn test_resolve_comparator_outcomes() {
        let s = scores(&[9, 7]);
        let ranked = rank_by_score(&s);
        assert_eq!(resolve_winner(&s, &ranked, ComparisonOutcome::FirstWins, None), 0);
        assert_eq!(resolve_winner(&s, &ranked, ComparisonOutcome::SecondWins, None), 1);
        assert_eq!(resolve_winner(&s, &ranked, ComparisonOutcome::Tie, None), 0);
    }

    #[test]
    fn test_resolve_uses_ranked_order_not_input_order() {
        let s = scores(&[3, 8, 6]);
        let ranked = rank_by_score(&s);
        assert_eq!(ranked, vec![1, 2, 0]);
        assert_eq!(resolve_winner(&s, &ranked, ComparisonOutcome::Tie, None), 1);
        assert_eq!(resolve_winner(&s, &ranked, ComparisonOutcome::SecondWins, None), 2);
    }

    #[test]
    fn test_vote_overrides_on_equal_score() {
        let s = scores(&[8, 6, 8]);
        let ranked = rank_by_score(&s);
        let winner = resolve_winner(
            &s,
            &ranked,
            ComparisonOutcome::FirstWins,
            Some(VoteOutcome::Chosen(2)),
        );
        assert_eq!(winner, 2);
    }

    #[test]
    fn test_vote_overrides_on_higher_score() {
        // Comparator picks the second-ranked (score 7); vote picks the top (9).
        let s = scores(&[9, 7, 4]);
        let ranked = rank_by_score(&s);
        let winner = resolve_winner(
            &s,
            &ranked,
            ComparisonOutcome::SecondWins,
            Some(VoteOutcome::Chosen(0)),
        );
        assert_eq!(winner, 0);
    }

    #[test]
    fn test_vote_does_not_override_on_lower_score() {
        let s = scores(&[9, 7, 4]);
        let ranked = rank_by_score(&s);
        let winner = resolve_winner(
            &s,
            &ranked,
            ComparisonOutcome::FirstWins,
            Some(VoteOutcome::Chosen(2)),
        );
        assert_eq!(winner, 0);
    }

    #[test]
    fn test_vote_fallback_behaves_as_index_zero() {
        let s = scores(&[6, 9, 6]);
        let ranked = rank_by_score(&s);
        // Comparator keeps index 1 (score 9); fallback vote (index 0, score 6) is worse.
        let winner = resolve_winner(
            &s,
            &ranked,
            ComparisonOutcome::FirstWins,
            Some(VoteOutcome::Fallback),
        );
        assert_eq!(winner, 1);
    }

    #[test]
    fn test_vote_out_of_range_is_ignored() {
        let s = scores(&[6, 9, 6]);
        let ranked = rank_by_score(&s);
        let winner = resolve_winner(
            &s,
            &ranked,
            ComparisonOutcome::FirstWins,
            Some(VoteOutcome::Chosen(17)),
        );
        assert_eq!(winner, 1);
    }

    #[test]
    fn test_resolve_degenerate_rankings() {
        let s = scores(&[4]);
        assert_eq!(resolve_winner(&s, &[0], ComparisonOutcome::SecondWins, None), 0);
        assert_eq!(resolve_winner(&[], &[], ComparisonOutcome::Tie, None), 0);
    }
}
