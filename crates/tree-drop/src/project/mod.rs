//! Project trait for abstracting file operations.
//!
//! The drop engine never touches the filesystem directly. Every stat/move/copy/delete/rename
//! goes through the `Project` that owns the affected node, so different backends can be plugged in:
//! - `LocalProject`: real local file system
//! - `InMemoryProject`: in-memory file map for testing
//!
//! Failures are reported as `ProjectError` and are not translated by callers, only propagated.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::tree::{ProjectId, TreeNode};

/// Result of probing a drop destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    /// Whether the target folder already contains an item with the source's name.
    pub exists: bool,
    /// Resolved path of that item. Equals the source path when the item is the source itself.
    pub fullpath: PathBuf,
}

/// Failure of a project file primitive. Every variant but `NotSupported` names the path involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectError {
    NotFound(String),
    PermissionDenied(String),
    /// The destination is taken; primitives never replace an item
    AlreadyExists(String),
    /// The project type doesn't implement this primitive
    NotSupported,
    /// Any other failure
    Io { path: String, message: String },
}

impl ProjectError {
    /// Classifies an I/O error raised while operating on `path`.
    pub(crate) fn io(err: io::Error, path: &Path) -> Self {
        let path = path.display().to_string();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            io::ErrorKind::AlreadyExists => Self::AlreadyExists(path),
            _ => Self::Io {
                path,
                message: err.to_string(),
            },
        }
    }
}

impl fmt::Display for ProjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "{} doesn't exist", path),
            Self::PermissionDenied(path) => write!(f, "{}: access denied", path),
            Self::AlreadyExists(path) => write!(f, "{} is taken", path),
            Self::NotSupported => f.write_str("not supported by this project"),
            Self::Io { path, message } => write!(f, "{}: {}", path, message),
        }
    }
}

impl std::error::Error for ProjectError {}

/// File primitives of one project.
///
/// Drop targets are folders: `stat_file`, `move_file` and `copy_file` take the folder that
/// receives the file, and the file keeps its name (or the explicit name given to `copy_file`).
/// Moves and copies never replace an existing item; callers delete it first.
///
/// Every method is a suspension point of the drop protocol.
#[async_trait]
pub trait Project: Send + Sync {
    fn id(&self) -> &ProjectId;

    /// Display name, used in log lines.
    fn name(&self) -> &str;

    /// Checks whether `target_folder` already holds an item named like `source`, and if it does,
    /// whether that item is `source` itself.
    async fn stat_file(&self, source: &Path, target_folder: &Path) -> Result<FileStat, ProjectError>;

    /// Moves a file into `target_folder`, creating the folder if needed.
    async fn move_file(&self, source: &Path, target_folder: &Path) -> Result<(), ProjectError>;

    /// Deletes a file (or directory) at `path`.
    async fn delete_file(&self, path: &Path) -> Result<(), ProjectError>;

    /// Renames a file in place. `new_name` is a bare file name, not a path.
    async fn rename_file(&self, path: &Path, new_name: &str) -> Result<(), ProjectError>;

    // ========================================
    // Optional: Default to NotSupported
    // ========================================

    /// Copies a file into `target_folder` as `file_name`, creating the folder if needed.
    async fn copy_file(&self, source: &Path, target_folder: &Path, file_name: &str) -> Result<(), ProjectError> {
        let _ = (source, target_folder, file_name);
        Err(ProjectError::NotSupported)
    }

    /// Lists every file below `folder`, recursively, in a stable order.
    async fn list_files(&self, folder: &Path) -> Result<Vec<PathBuf>, ProjectError> {
        let _ = folder;
        Err(ProjectError::NotSupported)
    }
}

/// Projects known to the drop engine, keyed by id.
#[derive(Clone, Default)]
pub struct ProjectRegistry {
    projects: HashMap<ProjectId, Arc<dyn Project>>,
}

impl ProjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a project, replacing any earlier project with the same id.
    pub fn register(&mut self, project: Arc<dyn Project>) {
        let id = project.id().clone();
        if self.projects.insert(id.clone(), project).is_some() {
            log::debug!("ProjectRegistry: replaced project {}", id);
        }
    }

    pub fn with(mut self, project: Arc<dyn Project>) -> Self {
        self.register(project);
        self
    }

    pub fn get(&self, id: &ProjectId) -> Option<Arc<dyn Project>> {
        self.projects.get(id).cloned()
    }

    /// Returns the project that owns `node`, if the node belongs to a registered project.
    pub fn for_node(&self, node: &TreeNode) -> Option<Arc<dyn Project>> {
        node.project_id.as_ref().and_then(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl fmt::Debug for ProjectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&ProjectId> = self.projects.keys().collect();
        ids.sort();
        f.debug_struct("ProjectRegistry").field("projects", &ids).finish()
    }
}

/// Path of `source` once dropped into `target_folder`.
pub(crate) fn dropped_path(source: &Path, target_folder: &Path) -> Result<PathBuf, ProjectError> {
    source
        .file_name()
        .map(|name| target_folder.join(name))
        .ok_or_else(|| ProjectError::Io {
            path: source.display().to_string(),
            message: format!("has no file name to drop into {}", target_folder.display()),
        })
}

// Implementations
mod in_memory;
mod local;

pub use in_memory::{FsOperation, FsPrimitive, InMemoryProject};
pub use local::LocalProject;
