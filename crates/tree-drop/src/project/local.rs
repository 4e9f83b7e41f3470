//! Local file system project implementation.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

use super::{FileStat, Project, ProjectError, dropped_path};
use crate::tree::ProjectId;

/// A project backed by the local file system.
///
/// Tree nodes carry absolute paths, which are used as-is. Relative paths are resolved against
/// the project directory.
pub struct LocalProject {
    id: ProjectId,
    name: String,
    root: PathBuf,
}

impl LocalProject {
    /// Creates a project rooted at `root` (the directory containing the project file).
    pub fn new(id: impl Into<String>, name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            id: ProjectId::new(id),
            name: name.into(),
            root: root.into(),
        }
    }

    pub(super) fn resolve(&self, path: &Path) -> PathBuf {
        if path.as_os_str().is_empty() || path == Path::new(".") {
            self.root.clone()
        } else if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

#[async_trait]
impl Project for LocalProject {
    fn id(&self) -> &ProjectId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn stat_file(&self, source: &Path, target_folder: &Path) -> Result<FileStat, ProjectError> {
        let target = dropped_path(source, &self.resolve(target_folder))?;
        // symlink_metadata so broken symlinks still count as existing
        match fs::symlink_metadata(&target).await {
            Ok(_) => {
                let fullpath = if is_same_entry(&self.resolve(source), &target).await {
                    source.to_path_buf()
                } else {
                    target
                };
                Ok(FileStat { exists: true, fullpath })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(FileStat {
                exists: false,
                fullpath: target,
            }),
            Err(e) => Err(ProjectError::io(e, &target)),
        }
    }

    async fn move_file(&self, source: &Path, target_folder: &Path) -> Result<(), ProjectError> {
        let source_abs = self.resolve(source);
        let target = dropped_path(&source_abs, &self.resolve(target_folder))?;
        prepare_destination(&target).await?;

        match fs::rename(&source_abs, &target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                // rename() can't cross filesystems: copy, then remove the original
                log::debug!(
                    "LocalProject: cross-device move, copying {} to {}",
                    source_abs.display(),
                    target.display()
                );
                fs::copy(&source_abs, &target)
                    .await
                    .map_err(|e| ProjectError::io(e, &target))?;
                fs::remove_file(&source_abs)
                    .await
                    .map_err(|e| ProjectError::io(e, &source_abs))
            }
            Err(e) => Err(ProjectError::io(e, &source_abs)),
        }
    }

    async fn delete_file(&self, path: &Path) -> Result<(), ProjectError> {
        let abs_path = self.resolve(path);
        let metadata = fs::symlink_metadata(&abs_path)
            .await
            .map_err(|e| ProjectError::io(e, &abs_path))?;
        let removed = if metadata.is_dir() {
            fs::remove_dir_all(&abs_path).await
        } else {
            fs::remove_file(&abs_path).await
        };
        removed.map_err(|e| ProjectError::io(e, &abs_path))
    }

    async fn rename_file(&self, path: &Path, new_name: &str) -> Result<(), ProjectError> {
        let abs_path = self.resolve(path);
        let renamed = abs_path.with_file_name(new_name);
        if fs::symlink_metadata(&renamed).await.is_ok() {
            return Err(ProjectError::AlreadyExists(renamed.display().to_string()));
        }
        fs::rename(&abs_path, &renamed)
            .await
            .map_err(|e| ProjectError::io(e, &abs_path))
    }

    async fn copy_file(&self, source: &Path, target_folder: &Path, file_name: &str) -> Result<(), ProjectError> {
        let source_abs = self.resolve(source);
        let target = self.resolve(target_folder).join(file_name);
        prepare_destination(&target).await?;
        fs::copy(&source_abs, &target)
            .await
            .map_err(|e| ProjectError::io(e, &source_abs))?;
        Ok(())
    }

    async fn list_files(&self, folder: &Path) -> Result<Vec<PathBuf>, ProjectError> {
        let folder_abs = self.resolve(folder);
        let folder_name = folder_abs.display().to_string();
        tokio::task::spawn_blocking(move || {
            let mut files = Vec::new();
            for entry in WalkDir::new(&folder_abs).min_depth(1).sort_by_file_name() {
                let entry = entry.map_err(|e| {
                    let path = e.path().unwrap_or(folder_abs.as_path()).to_path_buf();
                    match e.into_io_error() {
                        Some(err) => ProjectError::io(err, &path),
                        None => ProjectError::Io {
                            path: path.display().to_string(),
                            message: "symlink loop".to_string(),
                        },
                    }
                })?;
                if !entry.file_type().is_dir() {
                    files.push(entry.into_path());
                }
            }
            Ok(files)
        })
        .await
        .map_err(|e| ProjectError::Io {
            path: folder_name,
            message: format!("listing task failed: {}", e),
        })?
    }
}

/// Creates the destination's folder and refuses to replace an existing item.
///
/// rename() and copy() silently replace files on POSIX; overwriting is the caller's decision.
async fn prepare_destination(target: &Path) -> Result<(), ProjectError> {
    if fs::symlink_metadata(target).await.is_ok() {
        return Err(ProjectError::AlreadyExists(target.display().to_string()));
    }
    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| ProjectError::io(e, parent))?;
    }
    Ok(())
}

/// Checks whether two paths name the same directory entry.
///
/// Only the parent directories are canonicalized; the final component is compared as written, so a
/// hard link or symlink at `b` is a different entry even though it reaches the same data.
pub(super) async fn is_same_entry(a: &Path, b: &Path) -> bool {
    let (Some(a_name), Some(b_name)) = (a.file_name(), b.file_name()) else {
        return false;
    };
    if a_name != b_name {
        return false;
    }
    match (canonical_parent(a).await, canonical_parent(b).await) {
        (Some(a_parent), Some(b_parent)) => a_parent == b_parent,
        _ => false,
    }
}

async fn canonical_parent(path: &Path) -> Option<PathBuf> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::canonicalize(parent).await.ok()
}
