//! Conflict resolution shared by all actions.
//!
//! When a destination already exists, the effective choice comes from, in order:
//! - a cancelled context (abort, no prompt)
//! - a latched sticky choice (no prompt)
//! - the user, through the prompt host; the "…All" options are only offered for multi-action drops
//!
//! A dismissed prompt means Cancel.

use std::path::Path;

use super::context::{ActionContext, StickyChoice};
use crate::prompt::Prompt;

/// Option labels offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOption {
    Overwrite,
    KeepBoth,
    Skip,
    OverwriteAll,
    KeepBothAll,
    SkipAll,
}

impl FileOption {
    pub fn label(self) -> &'static str {
        match self {
            FileOption::Overwrite => "Overwrite",
            FileOption::KeepBoth => "Keep Both",
            FileOption::Skip => "Skip",
            FileOption::OverwriteAll => "Overwrite All",
            FileOption::KeepBothAll => "Keep Both All",
            FileOption::SkipAll => "Skip All",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Overwrite" => Some(FileOption::Overwrite),
            "Keep Both" => Some(FileOption::KeepBoth),
            "Skip" => Some(FileOption::Skip),
            "Overwrite All" => Some(FileOption::OverwriteAll),
            "Keep Both All" => Some(FileOption::KeepBothAll),
            "Skip All" => Some(FileOption::SkipAll),
            _ => None,
        }
    }

    /// Options shown for a conflict, in display order.
    pub fn prompt_options(multiple_actions: bool) -> Vec<FileOption> {
        let mut options = vec![FileOption::Overwrite, FileOption::KeepBoth, FileOption::Skip];
        if multiple_actions {
            options.extend([FileOption::OverwriteAll, FileOption::KeepBothAll, FileOption::SkipAll]);
        }
        options
    }

    fn sticky(self) -> Option<StickyChoice> {
        match self {
            FileOption::OverwriteAll => Some(StickyChoice::OverwriteAll),
            FileOption::KeepBothAll => Some(StickyChoice::KeepBothAll),
            FileOption::SkipAll => Some(StickyChoice::SkipAll),
            _ => None,
        }
    }

    fn choice(self) -> ConflictChoice {
        match self {
            FileOption::Overwrite | FileOption::OverwriteAll => ConflictChoice::Overwrite,
            FileOption::KeepBoth | FileOption::KeepBothAll => ConflictChoice::KeepBoth,
            FileOption::Skip | FileOption::SkipAll => ConflictChoice::Skip,
        }
    }
}

/// The effective resolution of one conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    Overwrite,
    KeepBoth,
    Skip,
    Cancel,
}

impl From<StickyChoice> for ConflictChoice {
    fn from(choice: StickyChoice) -> Self {
        match choice {
            StickyChoice::OverwriteAll => ConflictChoice::Overwrite,
            StickyChoice::KeepBothAll => ConflictChoice::KeepBoth,
            StickyChoice::SkipAll => ConflictChoice::Skip,
        }
    }
}

/// Decides how to resolve a conflict, prompting only when the context doesn't already decide.
///
/// Picking an "…All" option latches it on the context before the base choice is returned.
pub async fn choose_option(context: &mut ActionContext, prompt: &dyn Prompt, message: &str) -> ConflictChoice {
    if context.is_cancelled() {
        return ConflictChoice::Cancel;
    }
    if let Some(sticky) = context.sticky_choice() {
        return sticky.into();
    }

    let labels: Vec<String> = FileOption::prompt_options(context.multiple_actions())
        .into_iter()
        .map(|o| o.label().to_string())
        .collect();

    let Some(selected) = prompt.show_warning(message, &labels).await else {
        return ConflictChoice::Cancel;
    };

    let Some(option) = FileOption::from_label(&selected) else {
        log::warn!("choose_option: unknown option '{}', treating as cancel", selected);
        return ConflictChoice::Cancel;
    };

    if let Some(sticky) = option.sticky() {
        context.latch(sticky);
    }
    option.choice()
}

/// Name for the "Keep Both" sibling: `<stem><suffix><extension>`.
///
/// Only the final extension is split off, so `archive.tar.gz` becomes `archive.tar_copy.gz`.
/// Names without an extension (including dot-files like `.gitignore`) get the suffix appended.
pub fn keep_both_file_name(path: &Path, suffix: &str) -> String {
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(extension)) => {
            format!("{}{}.{}", stem.to_string_lossy(), suffix, extension.to_string_lossy())
        }
        _ => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            format!("{}{}", name, suffix)
        }
    }
}

/// File name used in prompt messages.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
