//! Copy a file from outside a project into one of its folders.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::conflict::{ConflictChoice, choose_option, display_name, keep_both_file_name};
use super::{Action, ActionContext, ActionOutcome};
use crate::error::{DropError, ProjectResultExt};
use crate::project::Project;
use crate::prompt::Prompt;

/// Copies `source` into `target_folder` through the project that owns the folder.
///
/// The source is never modified: "Keep Both" writes the copy under the suffixed name instead of
/// renaming the original.
pub struct CopyFile {
    project: Arc<dyn Project>,
    source: PathBuf,
    target_folder: PathBuf,
    keep_both_suffix: String,
}

impl CopyFile {
    pub fn new(
        project: Arc<dyn Project>,
        source: impl Into<PathBuf>,
        target_folder: impl Into<PathBuf>,
        keep_both_suffix: impl Into<String>,
    ) -> Self {
        Self {
            project,
            source: source.into(),
            target_folder: target_folder.into(),
            keep_both_suffix: keep_both_suffix.into(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn target_folder(&self) -> &Path {
        &self.target_folder
    }

    async fn copy_as(&self, file_name: &str) -> Result<(), DropError> {
        log::debug!(
            "CopyFile: {} -> {}/{} in {}",
            self.source.display(),
            self.target_folder.display(),
            file_name,
            self.project.name()
        );
        self.project
            .copy_file(&self.source, &self.target_folder, file_name)
            .await
            .at(&self.target_folder.join(file_name))
    }
}

#[async_trait]
impl Action for CopyFile {
    fn describe(&self) -> String {
        format!("copy {} -> {}", self.source.display(), self.target_folder.display())
    }

    async fn execute(&self, context: &mut ActionContext, prompt: &dyn Prompt) -> Result<ActionOutcome, DropError> {
        if context.is_cancelled() {
            return Ok(ActionOutcome::Cancelled);
        }

        let file_name = self
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| DropError::InvalidPath(self.source.display().to_string()))?;

        let stat = self
            .project
            .stat_file(&self.source, &self.target_folder)
            .await
            .at(&self.target_folder)?;
        if !stat.exists {
            self.copy_as(&file_name).await?;
            return Ok(ActionOutcome::Performed);
        }

        if stat.fullpath == self.source {
            log::debug!("CopyFile: {} dropped onto itself, nothing to do", self.source.display());
            return Ok(ActionOutcome::SameFile);
        }

        let message = format!(
            "Are you sure you want to copy '{}' overriding the existing file?",
            display_name(&self.source)
        );
        match choose_option(context, prompt, &message).await {
            ConflictChoice::Cancel => {
                log::info!("CopyFile: cancelled at {}", self.target_folder.display());
                context.cancel();
                Ok(ActionOutcome::Cancelled)
            }
            ConflictChoice::Skip => {
                log::debug!("CopyFile: skipping {}", self.source.display());
                Ok(ActionOutcome::Skipped)
            }
            ConflictChoice::Overwrite => {
                self.project.delete_file(&stat.fullpath).await.at(&stat.fullpath)?;
                self.copy_as(&file_name).await?;
                Ok(ActionOutcome::Performed)
            }
            ConflictChoice::KeepBoth => {
                let copy_name = keep_both_file_name(&self.source, &self.keep_both_suffix);
                self.copy_as(&copy_name).await?;
                Ok(ActionOutcome::Performed)
            }
        }
    }
}
