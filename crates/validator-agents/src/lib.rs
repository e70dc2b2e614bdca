//! Judge agents and selection orchestrator for ensemble reasoning validation.
//!
//! Given a problem and a set of candidate reasoning chains, the pipeline asks
//! an external judgment oracle (an OpenAI-compatible chat endpoint reached
//! through Rig) to verify, score, compare and vote on the candidates, then
//! selects one winner and extracts its numeric answer.
//!
//! The deterministic rules (input normalization, marker parsing, ranking and
//! winner resolution) live in the `selection` crate; this crate owns
//! everything that talks to the oracle.

pub mod agents;
pub mod config;
pub mod errors;
pub mod judge;
pub mod orchestrator;
pub mod prompts;
pub mod state_machine;

pub use config::{check_endpoint, EndpointConfig, ValidatorConfig, JUDGMENT_TEMPERATURE};
pub use errors::{JudgeError, JudgmentStage, ValidationError};
pub use judge::{JudgeRequest, JudgeSettings, RigJudge, TextJudge};
pub use orchestrator::{SelectionOrchestrator, SelectionReport};
pub use state_machine::{SelectionState, TransitionRecord};
