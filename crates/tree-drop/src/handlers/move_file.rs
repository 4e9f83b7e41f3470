//! Move files between folders of one project.

use async_trait::async_trait;

use super::{DropHandler, owning_project, same_project};
use crate::actions::{Action, MoveFile};
use crate::error::DropError;
use crate::project::ProjectRegistry;
use crate::tree::{ContextValue, TreeNode};

pub struct MoveFileInTheSameProject {
    keep_both_suffix: String,
}

impl MoveFileInTheSameProject {
    pub fn new(keep_both_suffix: impl Into<String>) -> Self {
        Self {
            keep_both_suffix: keep_both_suffix.into(),
        }
    }
}

#[async_trait]
impl DropHandler for MoveFileInTheSameProject {
    fn name(&self) -> &'static str {
        "MoveFileInTheSameProject"
    }

    async fn can_handle(&self, source: &TreeNode, target: &TreeNode) -> bool {
        source.context_value == ContextValue::ProjectFile
            && source.path.is_some()
            && same_project(source, target)
            && target.target_directory().is_some()
    }

    async fn handle(
        &self,
        source: &TreeNode,
        target: &TreeNode,
        projects: &ProjectRegistry,
    ) -> Result<Vec<Box<dyn Action>>, DropError> {
        let project = owning_project(source, projects)?;
        let (Some(path), Some(target_folder)) = (&source.path, target.target_directory()) else {
            return Ok(Vec::new());
        };
        let action: Box<dyn Action> = Box::new(MoveFile::new(
            project,
            path.clone(),
            target_folder,
            self.keep_both_suffix.clone(),
        ));
        Ok(vec![action])
    }
}
