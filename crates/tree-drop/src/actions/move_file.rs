//! Move a file into another folder of the same project.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::conflict::{ConflictChoice, choose_option, display_name, keep_both_file_name};
use super::{Action, ActionContext, ActionOutcome};
use crate::error::{DropError, ProjectResultExt};
use crate::project::Project;
use crate::prompt::Prompt;

pub struct MoveFile {
    project: Arc<dyn Project>,
    source: PathBuf,
    target_folder: PathBuf,
    keep_both_suffix: String,
}

impl MoveFile {
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

    async fn move_to_target(&self, from: &Path) -> Result<(), DropError> {
        log::debug!(
            "MoveFile: {} -> {} in {}",
            from.display(),
            self.target_folder.display(),
            self.project.name()
        );
        self.project.move_file(from, &self.target_folder).await.at(from)
    }
}

#[async_trait]
impl Action for MoveFile {
    fn describe(&self) -> String {
        format!("move {} -> {}", self.source.display(), self.target_folder.display())
    }

    async fn execute(&self, context: &mut ActionContext, prompt: &dyn Prompt) -> Result<ActionOutcome, DropError> {
        if context.is_cancelled() {
            return Ok(ActionOutcome::Cancelled);
        }

        let stat = self
            .project
            .stat_file(&self.source, &self.target_folder)
            .await
            .at(&self.target_folder)?;
        if !stat.exists {
            self.move_to_target(&self.source).await?;
            return Ok(ActionOutcome::Performed);
        }

        if stat.fullpath == self.source {
            log::debug!("MoveFile: {} dropped onto itself, nothing to do", self.source.display());
            return Ok(ActionOutcome::SameFile);
        }

        let message = format!(
            "Are you sure you want to move '{}' overriding the existing file?",
            display_name(&self.source)
        );
        match choose_option(context, prompt, &message).await {
            ConflictChoice::Cancel => {
                log::info!("MoveFile: cancelled at {}", self.target_folder.display());
                context.cancel();
                Ok(ActionOutcome::Cancelled)
            }
            ConflictChoice::Skip => {
                log::debug!("MoveFile: skipping {}", self.source.display());
                Ok(ActionOutcome::Skipped)
            }
            ConflictChoice::Overwrite => {
                // Two steps, not atomic: a failed move leaves the existing file deleted
                self.project.delete_file(&stat.fullpath).await.at(&stat.fullpath)?;
                self.move_to_target(&self.source).await?;
                Ok(ActionOutcome::Performed)
            }
            ConflictChoice::KeepBoth => {
                // Rename in place first so the move lands next to the existing file
                let copy_name = keep_both_file_name(&self.source, &self.keep_both_suffix);
                self.project.rename_file(&self.source, &copy_name).await.at(&self.source)?;
                let copy_path = self.source.with_file_name(&copy_name);
                self.move_to_target(&copy_path).await?;
                Ok(ActionOutcome::Performed)
            }
        }
    }
}
