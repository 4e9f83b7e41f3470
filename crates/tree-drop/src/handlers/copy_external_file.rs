//! Copy files from outside a project into it.

use async_trait::async_trait;

use super::{DropHandler, owning_project, same_project};
use crate::actions::{Action, CopyFile};
use crate::error::DropError;
use crate::project::ProjectRegistry;
use crate::tree::{ContextValue, TreeNode};

/// Copies a solution-level file, or a file of another project, into the target's directory.
///
/// The copy goes through the target's project; the source is left untouched.
pub struct CopyExternalFileInProjects {
    keep_both_suffix: String,
}

impl CopyExternalFileInProjects {
    pub fn new(keep_both_suffix: impl Into<String>) -> Self {
        Self {
            keep_both_suffix: keep_both_suffix.into(),
        }
    }
}

#[async_trait]
impl DropHandler for CopyExternalFileInProjects {
    fn name(&self) -> &'static str {
        "CopyExternalFileInProjects"
    }

    async fn can_handle(&self, source: &TreeNode, target: &TreeNode) -> bool {
        let external = match source.context_value {
            ContextValue::SolutionFile => true,
            ContextValue::ProjectFile => !same_project(source, target),
            _ => false,
        };
        external && source.path.is_some() && target.project_id.is_some() && target.target_directory().is_some()
    }

    async fn handle(
        &self,
        source: &TreeNode,
        target: &TreeNode,
        projects: &ProjectRegistry,
    ) -> Result<Vec<Box<dyn Action>>, DropError> {
        let project = owning_project(target, projects)?;
        let (Some(path), Some(target_folder)) = (&source.path, target.target_directory()) else {
            return Ok(Vec::new());
        };
        let action: Box<dyn Action> = Box::new(CopyFile::new(
            project,
            path.clone(),
            target_folder,
            self.keep_both_suffix.clone(),
        ));
        Ok(vec![action])
    }
}
