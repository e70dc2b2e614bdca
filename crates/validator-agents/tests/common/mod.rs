//! In-process judge for pipeline tests: replies are scripted per prompt kind
//! and per candidate tag, and every request is recorded.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use validator_agents::prompts::{COMPARE_PROMPT, SCORE_PROMPT, VERIFIER_PROMPT, VOTE_PROMPT};
use validator_agents::{JudgeError, JudgeRequest, JudgeSettings, TextJudge};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Verify,
    Score,
    Compare,
    Vote,
}

impl PromptKind {
    fn of(prompt: &str) -> Option<Self> {
        if prompt.starts_with(VERIFIER_PROMPT) {
            Some(Self::Verify)
        } else if prompt.starts_with(SCORE_PROMPT) {
            Some(Self::Score)
        } else if prompt.starts_with(COMPARE_PROMPT) {
            Some(Self::Compare)
        } else if prompt.starts_with(VOTE_PROMPT) {
            Some(Self::Vote)
        } else {
            None
        }
    }
}

struct Rule {
    kind: PromptKind,
    needle: String,
    reply: Result<String, String>,
}

/// Rules are tried in insertion order; the first whose kind matches and whose
/// needle appears in the prompt answers. Unscripted prompts fail as backend
/// errors.
#[derive(Default)]
pub struct ScriptedJudge {
    rules: Vec<Rule>,
    calls: Mutex<Vec<(PromptKind, JudgeRequest)>>,
}

impl ScriptedJudge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, kind: PromptKind, needle: &str, reply: &str) -> Self {
        self.rules.push(Rule {
            kind,
            needle: needle.to_string(),
            reply: Ok(reply.to_string()),
        });
        self
    }

    pub fn fail(mut self, kind: PromptKind, message: &str) -> Self {
        self.rules.push(Rule {
            kind,
            needle: String::new(),
            reply: Err(message.to_string()),
        });
        self
    }

    pub fn verify(self, needle: &str, reply: &str) -> Self {
        self.reply(PromptKind::Verify, needle, reply)
    }

    pub fn score(self, needle: &str, reply: &str) -> Self {
        self.reply(PromptKind::Score, needle, reply)
    }

    pub fn compare(self, reply: &str) -> Self {
        self.reply(PromptKind::Compare, "", reply)
    }

    pub fn vote(self, reply: &str) -> Self {
        self.reply(PromptKind::Vote, "", reply)
    }

    pub fn calls(&self, kind: PromptKind) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| *k == kind)
            .count()
    }

    pub fn requests(&self, kind: PromptKind) -> Vec<JudgeRequest> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, r)| r.clone())
            .collect()
    }
}

#[async_trait]
impl TextJudge for ScriptedJudge {
    async fn judge(&self, request: &JudgeRequest) -> Result<String, JudgeError> {
        let kind = PromptKind::of(&request.prompt)
            .ok_or_else(|| JudgeError::Backend("unrecognised prompt".into()))?;
        self.calls.lock().unwrap().push((kind, request.clone()));

        let rule = self
            .rules
            .iter()
            .find(|r| r.kind == kind && request.prompt.contains(&r.needle))
            .ok_or_else(|| JudgeError::Backend(format!("no scripted reply for {kind:?}")))?;
        rule.reply.clone().map_err(JudgeError::Backend)
    }
}

pub fn settings() -> JudgeSettings {
    JudgeSettings {
        system_role: "You are a meticulous verifier of mathematical reasoning.".into(),
        temperature: 0.3,
        max_tokens: 512,
        model: "scripted-judge".into(),
    }
}

/// Keep a handle on the judge for call-count assertions after the run.
pub fn shared(judge: ScriptedJudge) -> Arc<ScriptedJudge> {
    Arc::new(judge)
}
