//! Ensemble Selection Library
//!
//! Pure, I/O-free decision logic for choosing the most likely correct
//! reasoning trace out of several independently produced candidates.
//!
//! This crate never talks to an inference backend. It provides:
//! - Input normalization for problems and candidate thoughts
//! - Parsers for the verdict / score / comparison / vote markers an oracle
//!   is asked to conclude with, each returning an optional result plus a
//!   documented default
//! - Numeric answer extraction from free-form solution text
//! - Score ranking and the comparator/vote winner-resolution rules
//! - The `SelectionResult` artifact emitted at the end of a run
//!
//! The oracle-backed agents and the pipeline driver live in the
//! `validator-agents` crate.
//!
//! # Example
//!
//! ```
//! use selection::{resolve_winner, ComparisonOutcome, Score, ScoringSet, VoteOutcome};
//! use selection::markers::extract_answer;
//!
//! let scores = [Score::clamped(9), Score::clamped(7), Score::clamped(9)];
//! let top = selection::rank_by_score(&scores);
//! assert_eq!(top, vec![0, 2, 1]);
//!
//! let winner = resolve_winner(&scores, &top, ComparisonOutcome::Tie, Some(VoteOutcome::Chosen(2)));
//! assert_eq!(winner, 2);
//!
//! assert_eq!(extract_answer("so the answer is 5,050."), "5050");
//! # let _ = ScoringSet::from_verification(&[]);
//! ```

#![allow(clippy::uninlined_format_args)]

pub mod input;
pub mod markers;
pub mod ranking;
pub mod types;

pub use input::{Candidate, InputError, Problem, ValidationInput};
pub use ranking::{rank_by_score, resolve_winner, ScoringSet, TOP_K};
pub use types::{ComparisonOutcome, Score, SelectionResult, VerificationRecord, VoteOutcome};
