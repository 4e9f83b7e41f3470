//! Executable drop actions.
//!
//! An action is one fully-parameterized file operation (move X to Y, copy X to Y) that resolves its
//! own conflicts. Drop handlers create them; the controller runs each exactly once, in order,
//! lending them the drop's shared `ActionContext`.
//!
//! Conflict handling for every action:
//! 1. Stat the destination through the owning project
//! 2. Nothing there: perform the operation, no prompt
//! 3. The destination is the source itself: do nothing, no prompt
//! 4. Otherwise resolve a choice (see `conflict`) and apply it
//!
//! Filesystem failures are not caught here. They propagate to the controller and abort the batch.

mod conflict;
mod context;
mod copy_file;
mod move_file;

use async_trait::async_trait;
use serde::Serialize;

pub use conflict::{ConflictChoice, FileOption, choose_option, keep_both_file_name};
pub use context::{ActionContext, StickyChoice};
pub use copy_file::CopyFile;
pub use move_file::MoveFile;

use crate::error::DropError;
use crate::prompt::Prompt;

/// What executing an action ended up doing.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionOutcome {
    /// The operation ran (possibly after overwrite or keep-both)
    Performed,
    /// Source and destination are the same file, nothing to do
    SameFile,
    /// The user (or a sticky "Skip All") skipped this item
    Skipped,
    /// The drop was cancelled before or during this action; nothing was changed
    Cancelled,
}

#[async_trait]
pub trait Action: Send + Sync {
    /// Short description for log lines, like "move /a.txt -> /b/a.txt".
    fn describe(&self) -> String;

    async fn execute(&self, context: &mut ActionContext, prompt: &dyn Prompt) -> Result<ActionOutcome, DropError>;
}
