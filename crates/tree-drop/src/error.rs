//! Errors that abort a drop.
//!
//! User cancellation and unresolvable ids aren't errors. They end the drop quietly.

use std::fmt;
use std::path::Path;

use crate::project::ProjectError;
use crate::tree::ProjectId;

/// Errors that can occur while building or executing drop actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropError {
    /// A project file primitive failed
    Project { path: String, error: ProjectError },
    /// A node references a project that isn't registered
    ProjectNotRegistered(ProjectId),
    /// A node's path can't be used for the operation (for example, it has no file name)
    InvalidPath(String),
}

impl DropError {
    pub(crate) fn project(path: &Path, error: ProjectError) -> Self {
        Self::Project {
            path: path.display().to_string(),
            error,
        }
    }

    /// Returns a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            DropError::Project { path, error } => match error {
                ProjectError::NotFound(_) => {
                    format!("Cannot find \"{}\". It may have been moved or deleted.", path)
                }
                ProjectError::PermissionDenied(_) => {
                    format!("Cannot write to \"{}\": permission denied.", path)
                }
                ProjectError::AlreadyExists(_) => {
                    let filename = Path::new(path)
                        .file_name()
                        .map(|n| n.to_string_lossy())
                        .unwrap_or_default();
                    format!("\"{}\" already exists.", filename)
                }
                ProjectError::NotSupported => "This project doesn't support that operation.".to_string(),
                ProjectError::Io { message, .. } => format!("Error with \"{}\": {}", path, message),
            },
            DropError::ProjectNotRegistered(id) => format!("Project \"{}\" isn't loaded.", id),
            DropError::InvalidPath(path) => format!("\"{}\" can't be moved or copied.", path),
        }
    }
}

impl fmt::Display for DropError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project { path, error } => write!(f, "{} ({})", error, path),
            Self::ProjectNotRegistered(id) => write!(f, "Project not registered: {}", id),
            Self::InvalidPath(path) => write!(f, "Invalid path: {}", path),
        }
    }
}

impl std::error::Error for DropError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Project { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Attaches the path being operated on to a `ProjectError`.
pub(crate) trait ProjectResultExt<T> {
    fn at(self, path: &Path) -> Result<T, DropError>;
}

impl<T> ProjectResultExt<T> for Result<T, ProjectError> {
    fn at(self, path: &Path) -> Result<T, DropError> {
        self.map_err(|e| DropError::project(path, e))
    }
}
