//! Drag-and-drop orchestration for project trees.
//!
//! A tree-view host hands the [`DragAndDropController`] a drop target, the dropped node ids and a
//! cancellation token. The controller:
//! - resolves the ids back into [`TreeNode`]s (depth-first, first match wins)
//! - asks every registered [`DropHandler`] whether it applies to each (source, target) pair
//! - runs the resulting [`Action`]s one by one under a shared [`ActionContext`]
//!
//! Each action resolves its own conflicts (overwrite, keep both, skip, cancel) and can remember
//! the user's "…All" choice for the rest of the drop through the shared context.
//!
//! Filesystem access goes through the [`Project`] trait (`LocalProject` for the real disk,
//! `InMemoryProject` for tests), and user interaction through the [`Prompt`] trait.

pub mod actions;
mod cancellation;
mod config;
mod controller;
mod error;
pub mod handlers;
pub mod project;
mod prompt;
mod resolver;
mod transfer;
mod tree;

pub use actions::{Action, ActionContext, ActionOutcome, ConflictChoice, CopyFile, FileOption, MoveFile, StickyChoice};
pub use cancellation::CancellationToken;
pub use config::DropConfig;
pub use controller::{DragAndDropController, DropSummary};
pub use error::DropError;
pub use handlers::{
    CopyExternalFileInProjects, DropHandler, MoveFileInTheSameProject, MoveFolderInTheSameProject, default_handlers,
};
pub use project::{FileStat, InMemoryProject, LocalProject, Project, ProjectError, ProjectRegistry};
pub use prompt::{Prompt, PromptRecord, ScriptedPrompt};
pub use resolver::{TreeProvider, TreeSnapshot, find_node_by_id, resolve_nodes};
pub use transfer::{DataTransfer, DataTransferItem, SOLUTION_EXPLORER_MIME_TYPE};
pub use tree::{ContextValue, ProjectId, TreeNode};

#[cfg(test)]
mod controller_test;

/// Initializes `env_logger` once for unit tests so `RUST_LOG=trace` shows the drop protocol.
#[cfg(test)]
pub(crate) fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
