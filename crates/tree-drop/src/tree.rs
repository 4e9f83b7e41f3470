//! Project tree snapshot types.
//!
//! The tree-view host owns these nodes. The drop engine only reads snapshots of them and never
//! changes a node's identity.

use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

/// Identifier of a project inside the solution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of tree node, as exposed to the host through the node's context value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ContextValue {
    Solution,
    /// Virtual folder at solution level (usually has no path)
    SolutionFolder,
    /// File attached to the solution, not to any project
    SolutionFile,
    /// Project node; its path is the project file
    Project,
    ProjectFolder,
    ProjectFile,
    /// The "References" group under a project
    ProjectReferences,
    ProjectReference,
}

/// A node of the project tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// Opaque id, unique within one snapshot
    pub id: String,
    pub label: String,
    /// Filesystem location, absent for virtual nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub context_value: ContextValue,
    /// Owning project, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    /// Children, only present once the host has expanded the node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>, context_value: ContextValue) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            path: None,
            context_value,
            project_id: None,
            children: None,
        }
    }

    /// A project node. `project_file` is the project file (for example `/src/app/app.csproj`).
    pub fn project(id: impl Into<String>, project_id: impl Into<String>, project_file: impl Into<PathBuf>) -> Self {
        let project_file = project_file.into();
        Self::new(id, label_for(&project_file), ContextValue::Project)
            .with_path(project_file)
            .in_project(project_id)
    }

    pub fn project_folder(id: impl Into<String>, project_id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::new(id, label_for(&path), ContextValue::ProjectFolder)
            .with_path(path)
            .in_project(project_id)
    }

    pub fn project_file(id: impl Into<String>, project_id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::new(id, label_for(&path), ContextValue::ProjectFile)
            .with_path(path)
            .in_project(project_id)
    }

    pub fn solution_file(id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::new(id, label_for(&path), ContextValue::SolutionFile).with_path(path)
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn in_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(ProjectId::new(project_id));
        self
    }

    /// Marks the node as expanded with the given children.
    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn is_project(&self) -> bool {
        self.context_value == ContextValue::Project
    }

    /// File name of the node's path, if it has one.
    pub fn file_name(&self) -> Option<&OsStr> {
        self.path.as_deref().and_then(Path::file_name)
    }

    /// Directory that receives items dropped onto this node.
    ///
    /// Projects and files drop into their containing directory, folders into themselves.
    /// References and virtual nodes can't receive files.
    pub fn target_directory(&self) -> Option<PathBuf> {
        let path = self.path.as_deref()?;
        match self.context_value {
            ContextValue::Project | ContextValue::ProjectFile | ContextValue::SolutionFile => {
                path.parent().map(Path::to_path_buf)
            }
            ContextValue::ProjectFolder | ContextValue::SolutionFolder => Some(path.to_path_buf()),
            ContextValue::Solution | ContextValue::ProjectReferences | ContextValue::ProjectReference => None,
        }
    }
}

fn label_for(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
