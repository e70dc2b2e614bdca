//! Judgment prompt templates.
//!
//! Prompt versioning: bump `PROMPT_VERSION` whenever template content changes.
//! Every run logs the version so a verdict can be traced back to the wording
//! that produced it.
//!
//! Each template ends by telling the oracle which exact phrase to conclude
//! with; the matching parsers live in `selection::markers`.

use selection::{Candidate, Problem};

/// Prompt version. Bump on any template content change.
pub const PROMPT_VERSION: &str = "1.0.0";

/// Verifier rubric. Must conclude "Reasoning is Valid" / "Reasoning is Invalid".
pub const VERIFIER_PROMPT: &str = "\
As a critical mathematical reasoning verifier, evaluate the following thought process, \
which builds upon previous steps to reach a final conclusion. Focus on:

1. **Question Relevance**:
   - Ensure the entire reasoning process directly addresses the original question.
   - Check if the final answer actually solves what was asked.

2. **Reasoning Progression**:
   - Assess logical flow and consistency, especially in final steps.
   - Verify mathematical operations' correctness and appropriateness.
   - Identify logical fallacies or unjustified leaps.

3. **Factual Accuracy**:
   - Check accuracy and relevance of facts and numbers, particularly in final calculations.
   - Spot any misuse of mathematical concepts.

4. **Completeness**:
   - Ensure all necessary aspects are addressed, particularly in concluding thoughts.
   - Identify significant omissions that could affect the result.

5. **Critical Assessment**:
   - Actively seek potential errors or weak points.
   - Don't hesitate to invalidate reasoning if significant issues are found.

Provide a holistic evaluation of the entire reasoning process, from start to finish. \
Conclude with \"Reasoning is Valid\" only if the entire process is relevant, logically sound, \
and error-free. Otherwise, conclude with \"Reasoning is Invalid\" and briefly explain why.";

/// Must conclude "Thus the correctness score is N".
pub const SCORE_PROMPT: &str = "\
Analyze the following solution, then at the last line conclude \
\"Thus the correctness score is {s}\", where s is an integer from 1 to 10.";

/// Must conclude with one of the three comparison phrases.
pub const COMPARE_PROMPT: &str = "\
Briefly analyze the correctness of the following two solutions. Conclude in the last line \
\"The more correct solution is 1\", \"The more correct solution is 2\", or \
\"Both solutions are similarly correct\".";

/// Must conclude "The best choice is N" (1-based).
pub const VOTE_PROMPT: &str = "\
Given an instruction and several choices, decide which choice is most promising. \
Analyze each choice in detail, then conclude in the last line \"The best choice is {s}\", \
where s the integer id of the choice.";

pub fn render_verification(candidate: &Candidate, problem: &Problem) -> String {
    format!(
        "{VERIFIER_PROMPT}\n\nQuestion: {problem}\n\nReasoning to verify:\n{candidate}\n\nVerification:"
    )
}

pub fn render_score(candidate: &Candidate, problem: &Problem) -> String {
    format!("{SCORE_PROMPT}\n\nQuestion: {problem}\n\nSolution to analyze:\n{candidate}\n\nAnalysis:")
}

pub fn render_comparison(first: &Candidate, second: &Candidate, problem: &Problem) -> String {
    format!(
        "{COMPARE_PROMPT}\n\nQuestion: {problem}\n\nSolution 1:\n{first}\n\nSolution 2:\n{second}\n\nComparison:"
    )
}

/// Enumerate every candidate as `Choice {i}` (1-based), each restating the
/// question.
pub fn render_vote(candidates: &[Candidate], problem: &Problem) -> String {
    let mut prompt = String::from(VOTE_PROMPT);
    prompt.push('\n');
    for (i, candidate) in candidates.iter().enumerate() {
        prompt.push_str(&format!(
            "\nChoice {}:\nQuestion: {problem}\n\n{candidate}\n",
            i + 1
        ));
    }
    prompt
}
