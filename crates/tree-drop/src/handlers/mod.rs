//! Drop handlers: which operation a (source, target) pair turns into.
//!
//! The controller asks every registered handler about every dropped node, in registration order,
//! and concatenates the actions of all handlers that apply. Handlers are stateless apart from
//! configuration and never touch the filesystem in `can_handle`.
//!
//! Routing by node kind:
//! - solution file, or file of another project → `CopyExternalFileInProjects`
//! - file of the target's project → `MoveFileInTheSameProject`
//! - folder of the target's project → `MoveFolderInTheSameProject` (one move per contained file)

mod copy_external_file;
mod move_file;
mod move_folder;

use async_trait::async_trait;
use std::sync::Arc;

pub use copy_external_file::CopyExternalFileInProjects;
pub use move_file::MoveFileInTheSameProject;
pub use move_folder::MoveFolderInTheSameProject;

use crate::actions::Action;
use crate::config::DropConfig;
use crate::error::DropError;
use crate::project::{Project, ProjectRegistry};
use crate::tree::TreeNode;

#[async_trait]
pub trait DropHandler: Send + Sync {
    /// Name used in log lines.
    fn name(&self) -> &'static str;

    /// Whether this handler applies to dropping `source` onto `target`. Must not have side effects.
    async fn can_handle(&self, source: &TreeNode, target: &TreeNode) -> bool;

    /// Builds the actions for the pair. Only called when `can_handle` returned true.
    async fn handle(
        &self,
        source: &TreeNode,
        target: &TreeNode,
        projects: &ProjectRegistry,
    ) -> Result<Vec<Box<dyn Action>>, DropError>;
}

/// The built-in handlers, in registration order. Disabled features are left out.
pub fn default_handlers(config: &DropConfig) -> Vec<Box<dyn DropHandler>> {
    let mut handlers: Vec<Box<dyn DropHandler>> = Vec::with_capacity(3);
    if config.copy_external_files {
        handlers.push(Box::new(CopyExternalFileInProjects::new(&config.keep_both_suffix)));
    }
    handlers.push(Box::new(MoveFileInTheSameProject::new(&config.keep_both_suffix)));
    if config.move_folders {
        handlers.push(Box::new(MoveFolderInTheSameProject::new(&config.keep_both_suffix)));
    }
    handlers
}

/// True if both nodes belong to the same project.
pub(crate) fn same_project(source: &TreeNode, target: &TreeNode) -> bool {
    matches!((&source.project_id, &target.project_id), (Some(a), Some(b)) if a == b)
}

/// Looks up the project owning `node`.
pub(crate) fn owning_project(node: &TreeNode, projects: &ProjectRegistry) -> Result<Arc<dyn Project>, DropError> {
    projects.for_node(node).ok_or_else(|| match &node.project_id {
        Some(id) => DropError::ProjectNotRegistered(id.clone()),
        None => DropError::InvalidPath(node_path(node)),
    })
}

/// The node's path, or its id for virtual nodes, for error messages.
fn node_path(node: &TreeNode) -> String {
    node.path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| node.id.clone())
}

#[cfg(test)]
mod handlers_test;
