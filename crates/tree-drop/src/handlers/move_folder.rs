//! Move a folder, file by file, within its project.

use async_trait::async_trait;
use std::path::Path;

use super::{DropHandler, owning_project, same_project};
use crate::actions::{Action, MoveFile};
use crate::error::{DropError, ProjectResultExt};
use crate::project::ProjectRegistry;
use crate::tree::{ContextValue, TreeNode};

/// Moves every file below a project folder into `<target dir>/<folder name>/`, keeping the
/// layout below the folder.
///
/// Each file becomes its own `MoveFile`, so conflicts are resolved per file. The emptied source
/// folders are left in place.
pub struct MoveFolderInTheSameProject {
    keep_both_suffix: String,
}

impl MoveFolderInTheSameProject {
    pub fn new(keep_both_suffix: impl Into<String>) -> Self {
        Self {
            keep_both_suffix: keep_both_suffix.into(),
        }
    }
}

#[async_trait]
impl DropHandler for MoveFolderInTheSameProject {
    fn name(&self) -> &'static str {
        "MoveFolderInTheSameProject"
    }

    async fn can_handle(&self, source: &TreeNode, target: &TreeNode) -> bool {
        if source.context_value != ContextValue::ProjectFolder
            || !(target.is_project() || target.context_value == ContextValue::ProjectFolder)
            || !same_project(source, target)
        {
            return false;
        }
        match (&source.path, target.target_directory()) {
            // Can't move a folder into itself or below itself
            (Some(folder), Some(target_dir)) => !target_dir.starts_with(folder),
            _ => false,
        }
    }

    async fn handle(
        &self,
        source: &TreeNode,
        target: &TreeNode,
        projects: &ProjectRegistry,
    ) -> Result<Vec<Box<dyn Action>>, DropError> {
        let project = owning_project(source, projects)?;
        let (Some(folder), Some(target_dir)) = (&source.path, target.target_directory()) else {
            return Ok(Vec::new());
        };
        let Some(folder_name) = source.file_name() else {
            return Err(DropError::InvalidPath(folder.display().to_string()));
        };
        let destination = target_dir.join(folder_name);

        let files = project.list_files(folder).await.at(folder)?;
        log::debug!(
            "MoveFolderInTheSameProject: {} file(s) from {} to {}",
            files.len(),
            folder.display(),
            destination.display()
        );

        let mut actions: Vec<Box<dyn Action>> = Vec::with_capacity(files.len());
        for file in files {
            let relative = file
                .strip_prefix(folder)
                .map_err(|_| DropError::InvalidPath(file.display().to_string()))?;
            let target_folder = match relative.parent() {
                Some(parent) if parent != Path::new("") => destination.join(parent),
                _ => destination.clone(),
            };
            actions.push(Box::new(MoveFile::new(
                project.clone(),
                file,
                target_folder,
                self.keep_both_suffix.clone(),
            )));
        }
        Ok(actions)
    }
}
