//! Scripted in-memory backend.
//!
//! Replays prepared assistant turns in order and records every conversation it
//! was shown. Useful for offline runs and tests of the agent loop.

use super::{AgentTurn, LlmBackend};
use crate::agent::ToolSpec;
use crate::error::{RagytError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Backend that answers from a fixed script.
pub struct ScriptedBackend {
    script: Mutex<VecDeque<Result<AgentTurn>>>,
    seen: Mutex<Vec<Vec<AgentTurn>>>,
}

impl ScriptedBackend {
    pub fn new(turns: Vec<AgentTurn>) -> Self {
        Self::with_results(turns.into_iter().map(Ok).collect())
    }

    /// Script that may include backend failures.
    pub fn with_results(results: Vec<Result<AgentTurn>>) -> Self {
        Self {
            script: Mutex::new(results.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Conversations passed to `complete`, one per call.
    pub fn seen(&self) -> Vec<Vec<AgentTurn>> {
        self.seen.lock().map(|seen| seen.clone()).unwrap_or_default()
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().map(|s| s.len()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmBackend for ScriptedBackend {
    async fn complete(&self, history: &[AgentTurn], _tools: &[ToolSpec]) -> Result<AgentTurn> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(history.to_vec());
        }

        let next = self
            .script
            .lock()
            .map_err(|_| RagytError::LlmUnavailable("script lock poisoned".to_string()))?
            .pop_front();

        next.unwrap_or_else(|| Err(RagytError::LlmUnavailable("script exhausted".to_string())))
    }
}
