//! Interactive prompt host.
//!
//! The host shows a modal warning with a message and an ordered list of option labels, and
//! reports which label the user picked. A dismissed prompt returns `None`.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

#[async_trait]
pub trait Prompt: Send + Sync {
    /// Shows a modal choice and waits for the user. `None` means the prompt was dismissed.
    async fn show_warning(&self, message: &str, options: &[String]) -> Option<String>;

    /// Surfaces a failed drop to the user.
    async fn show_error(&self, message: &str) {
        log::error!("{}", message);
    }
}

/// A warning shown through `ScriptedPrompt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRecord {
    pub message: String,
    pub options: Vec<String>,
}

#[derive(Default)]
struct ScriptState {
    answers: VecDeque<Option<String>>,
    warnings: Vec<PromptRecord>,
    errors: Vec<String>,
}

/// A prompt that replays pre-recorded answers, for tests and headless hosts.
///
/// Once the script runs out, every further prompt is treated as dismissed.
#[derive(Default)]
pub struct ScriptedPrompt {
    state: Mutex<ScriptState>,
}

impl ScriptedPrompt {
    pub fn new<S: Into<String>>(answers: impl IntoIterator<Item = Option<S>>) -> Self {
        Self {
            state: Mutex::new(ScriptState {
                answers: answers.into_iter().map(|a| a.map(Into::into)).collect(),
                ..ScriptState::default()
            }),
        }
    }

    /// A prompt that picks the given labels, in order.
    pub fn answering<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Self {
        Self::new(labels.into_iter().map(Some))
    }

    fn state(&self) -> MutexGuard<'_, ScriptState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Warnings shown so far, in order.
    pub fn warnings(&self) -> Vec<PromptRecord> {
        self.state().warnings.clone()
    }

    /// Errors surfaced so far, in order.
    pub fn errors(&self) -> Vec<String> {
        self.state().errors.clone()
    }
}

#[async_trait]
impl Prompt for ScriptedPrompt {
    async fn show_warning(&self, message: &str, options: &[String]) -> Option<String> {
        let mut state = self.state();
        state.warnings.push(PromptRecord {
            message: message.to_string(),
            options: options.to_vec(),
        });
        let answer = state.answers.pop_front().flatten();
        if answer.is_none() {
            log::debug!("ScriptedPrompt: dismissing '{}'", message);
        }
        answer
    }

    async fn show_error(&self, message: &str) {
        self.state().errors.push(message.to_string());
    }
}
