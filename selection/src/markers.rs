//! Parsers for the conclusion markers the oracle is asked to emit.
//!
//! Every judgment prompt instructs the oracle to finish with a fixed phrase
//! ("Reasoning is Valid", "Thus the correctness score is 7", ...). Oracles do
//! not always comply, so each parser returns `Option` and the caller applies
//! the documented default for a miss. None of these functions fail.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{ComparisonOutcome, Score};

/// Lower-cased phrase that marks a passing verification.
pub const VALID_MARKER: &str = "reasoning is valid";

const FIRST_WINS_MARKER: &str = "more correct solution is 1";
const SECOND_WINS_MARKER: &str = "more correct solution is 2";

/// `correctness score is N`. Case-sensitive, matching the wording the score
/// prompt mandates.
static SCORE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"correctness score is (\d+)").expect("SCORE_RE regex should compile")
});

static VOTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)best choice is (\d+)").expect("VOTE_RE regex should compile")
});

/// `the answer is` followed by optional non-digits, then digits with
/// optional thousands separators.
static ANSWER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)the answer is[^\d]*(\d[\d,]*)").expect("ANSWER_RE regex should compile")
});

/// Code points of `0` for the decimal digit blocks oracles emit: ASCII,
/// Arabic-Indic, Extended Arabic-Indic, Devanagari and full-width.
const DIGIT_ZEROS: [u32; 5] = [0x30, 0x660, 0x6F0, 0x966, 0xFF10];

fn decimal_digit(c: char) -> Option<u64> {
    let cp = c as u32;
    DIGIT_ZEROS
        .iter()
        .find(|&&zero| (zero..zero + 10).contains(&cp))
        .map(|&zero| u64::from(cp - zero))
}

/// Value of a `\d+` capture. Runs too large for `u64` saturate; a digit from
/// an unsupported script makes the whole run unreadable.
fn digit_run_value(run: &str) -> Option<u64> {
    run.chars().try_fold(0u64, |acc, c| {
        Some(acc.saturating_mul(10).saturating_add(decimal_digit(c)?))
    })
}

/// Whether a verifier response concludes the reasoning is valid.
///
/// Anything that lacks the marker, including hedged or ambiguous wording,
/// counts as invalid.
pub fn parse_validity(response: &str) -> bool {
    response.to_lowercase().contains(VALID_MARKER)
}

/// Extract and clamp a score, or `None` when the marker is absent.
///
/// Digit runs too large for `u64` saturate to the maximum score. Full-width
/// and Arabic-Indic digits read as their values.
pub fn parse_score(response: &str) -> Option<Score> {
    let caps = SCORE_RE.captures(response)?;
    digit_run_value(&caps[1]).map(Score::clamped)
}

/// Map a comparator response onto an outcome. Ambiguity is a tie.
pub fn parse_comparison(response: &str) -> ComparisonOutcome {
    let lower = response.to_lowercase();
    if lower.contains(FIRST_WINS_MARKER) {
        ComparisonOutcome::FirstWins
    } else if lower.contains(SECOND_WINS_MARKER) {
        ComparisonOutcome::SecondWins
    } else {
        ComparisonOutcome::Tie
    }
}

/// Extract a 0-based vote over a group of `count` choices labelled from 1.
///
/// Returns `None` when the marker is absent or the label falls outside the
/// group.
pub fn parse_vote(response: &str, count: usize) -> Option<usize> {
    let caps = VOTE_RE.captures(response)?;
    let label = usize::try_from(digit_run_value(&caps[1])?).ok()?;
    let index = label.checked_sub(1)?;
    (index < count).then_some(index)
}

/// Pull the final numeric answer out of a solution, separators removed.
///
/// Returns an empty string when the text states no numeric answer.
pub fn extract_answer(text: &str) -> String {
    ANSWER_RE
        .captures(text)
        .map(|caps| caps[1].replace(',', ""))
        .unwrap_or_default()
}
