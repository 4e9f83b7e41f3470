//! Drop configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the drag-and-drop controller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DropConfig {
    /// Inserted before the extension when the user picks "Keep Both" (default: "_copy")
    #[serde(default = "default_keep_both_suffix")]
    pub keep_both_suffix: String,
    /// Whether files from outside a project can be dropped into it (default: true)
    #[serde(default = "default_true")]
    pub copy_external_files: bool,
    /// Whether folders can be moved within their project (default: true)
    #[serde(default = "default_true")]
    pub move_folders: bool,
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            keep_both_suffix: default_keep_both_suffix(),
            copy_external_files: true,
            move_folders: true,
        }
    }
}

fn default_keep_both_suffix() -> String {
    "_copy".to_string()
}

fn default_true() -> bool {
    true
}
