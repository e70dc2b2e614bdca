//! Input normalization at the pipeline boundary.
//!
//! Problems and candidates arrive as loosely-cleaned text (often JSON-escaped
//! by whatever produced them). All cleanup happens here, once, so the rest of
//! the pipeline can treat `Problem` and `Candidate` as already-normalized.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error type for malformed pipeline input.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("malformed input: {0}")]
    Malformed(String),
}

/// The question every candidate is trying to answer.
///
/// Trailing commas (an artifact of hand-assembled JSON payloads) are
/// stripped, then surrounding whitespace. A comma followed by whitespace
/// survives: `"x?, "` becomes `"x?,"`. An empty problem is allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Problem(String);

impl Problem {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim_end_matches(',').trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One complete reasoning trace, identified only by its position in the
/// input sequence.
///
/// Literal `\"` sequences are unescaped to `"` and surrounding whitespace is
/// trimmed. Two candidates with the same normalized text compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Candidate(String);

impl Candidate {
    pub fn new(raw: &str) -> Self {
        Self(raw.replace("\\\"", "\"").trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw request payload, as produced by the upstream reasoning stage.
///
/// `func_name` is carried by upstream callers for routing; it is accepted
/// and ignored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub func_name: Option<String>,
    pub problem: String,
    pub thoughts: Vec<String>,
}

impl ValidationInput {
    pub fn new(problem: impl Into<String>, thoughts: Vec<String>) -> Self {
        Self {
            func_name: None,
            problem: problem.into(),
            thoughts,
        }
    }

    /// Parse a JSON payload. Wrong types or missing fields are reported as
    /// `InputError::Malformed`.
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        serde_json::from_str(json).map_err(|e| InputError::Malformed(e.to_string()))
    }

    /// Apply boundary normalization, producing the typed problem and the
    /// candidate sequence in input order.
    pub fn normalize(&self) -> (Problem, Vec<Candidate>) {
        let problem = Problem::new(&self.problem);
        let candidates = self.thoughts.iter().map(|t| Candidate::new(t)).collect();
        (problem, candidates)
    }
}
