//! In-memory project implementation for testing.
//!
//! Files live in a sorted map; directories exist implicitly as ancestors of files. Several projects
//! can share one map (see `InMemoryProject::on_same_disk`), the way real projects share a disk.
//! Every successful mutation is appended to an operation log so tests can assert exactly which
//! primitives a drop performed, and individual primitives can be made to fail.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use super::{FileStat, Project, ProjectError, dropped_path};
use crate::tree::ProjectId;

/// Primitive of the `Project` trait, used to inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FsPrimitive {
    Stat,
    Move,
    Copy,
    Delete,
    Rename,
    List,
}

/// A mutation recorded by `InMemoryProject`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsOperation {
    Move {
        source: PathBuf,
        target_folder: PathBuf,
    },
    Copy {
        source: PathBuf,
        target_folder: PathBuf,
        file_name: String,
    },
    Delete { path: PathBuf },
    Rename { path: PathBuf, new_name: String },
}

#[derive(Default)]
struct State {
    files: BTreeMap<PathBuf, Vec<u8>>,
    operations: Vec<FsOperation>,
    failures: HashMap<FsPrimitive, ProjectError>,
}

impl State {
    fn check(&self, primitive: FsPrimitive) -> Result<(), ProjectError> {
        match self.failures.get(&primitive) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.files.keys().any(|file| file != path && file.starts_with(path))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.is_dir(path)
    }
}

/// A project that keeps its files in memory.
pub struct InMemoryProject {
    id: ProjectId,
    name: String,
    state: Arc<Mutex<State>>,
}

impl InMemoryProject {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ProjectId::new(id),
            name: name.into(),
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// Creates another project backed by the same files, operation log and injected failures.
    pub fn on_same_disk(&self, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ProjectId::new(id),
            name: name.into(),
            state: Arc::clone(&self.state),
        }
    }

    /// Creates a project pre-populated with the given files. Each file's content is its own path.
    pub fn with_files<P: AsRef<Path>>(
        id: impl Into<String>,
        name: impl Into<String>,
        files: impl IntoIterator<Item = P>,
    ) -> Self {
        let project = Self::new(id, name);
        for file in files {
            let path = file.as_ref();
            project.add_file(path, path.to_string_lossy().as_bytes());
        }
        project
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn add_file(&self, path: impl Into<PathBuf>, content: &[u8]) {
        self.state().files.insert(path.into(), content.to_vec());
    }

    /// Makes every later call of `primitive` fail with `error`.
    pub fn fail_on(&self, primitive: FsPrimitive, error: ProjectError) {
        self.state().failures.insert(primitive, error);
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.state().exists(path.as_ref())
    }

    pub fn read(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.state().files.get(path.as_ref()).cloned()
    }

    /// All file paths, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        self.state().files.keys().cloned().collect()
    }

    /// Mutations performed so far, in order.
    pub fn operations(&self) -> Vec<FsOperation> {
        self.state().operations.clone()
    }
}

#[async_trait]
impl Project for InMemoryProject {
    fn id(&self) -> &ProjectId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn stat_file(&self, source: &Path, target_folder: &Path) -> Result<FileStat, ProjectError> {
        let state = self.state();
        state.check(FsPrimitive::Stat)?;
        let target = dropped_path(source, target_folder)?;
        // No links in memory: the item is the source only if it has the same path
        let fullpath = if target == source { source.to_path_buf() } else { target };
        Ok(FileStat {
            exists: state.exists(&fullpath),
            fullpath,
        })
    }

    async fn move_file(&self, source: &Path, target_folder: &Path) -> Result<(), ProjectError> {
        let mut state = self.state();
        state.check(FsPrimitive::Move)?;
        let target = dropped_path(source, target_folder)?;
        if state.exists(&target) {
            return Err(ProjectError::AlreadyExists(target.display().to_string()));
        }
        let content = state
            .files
            .remove(source)
            .ok_or_else(|| ProjectError::NotFound(source.display().to_string()))?;
        state.files.insert(target, content);
        state.operations.push(FsOperation::Move {
            source: source.to_path_buf(),
            target_folder: target_folder.to_path_buf(),
        });
        Ok(())
    }

    async fn delete_file(&self, path: &Path) -> Result<(), ProjectError> {
        let mut state = self.state();
        state.check(FsPrimitive::Delete)?;
        if state.files.remove(path).is_none() {
            if !state.is_dir(path) {
                return Err(ProjectError::NotFound(path.display().to_string()));
            }
            state.files.retain(|file, _| !file.starts_with(path));
        }
        state.operations.push(FsOperation::Delete {
            path: path.to_path_buf(),
        });
        Ok(())
    }

    async fn rename_file(&self, path: &Path, new_name: &str) -> Result<(), ProjectError> {
        let mut state = self.state();
        state.check(FsPrimitive::Rename)?;
        let renamed = path.with_file_name(new_name);
        if state.exists(&renamed) {
            return Err(ProjectError::AlreadyExists(renamed.display().to_string()));
        }
        let content = state
            .files
            .remove(path)
            .ok_or_else(|| ProjectError::NotFound(path.display().to_string()))?;
        state.files.insert(renamed, content);
        state.operations.push(FsOperation::Rename {
            path: path.to_path_buf(),
            new_name: new_name.to_string(),
        });
        Ok(())
    }

    async fn copy_file(&self, source: &Path, target_folder: &Path, file_name: &str) -> Result<(), ProjectError> {
        let mut state = self.state();
        state.check(FsPrimitive::Copy)?;
        let target = target_folder.join(file_name);
        if state.exists(&target) {
            return Err(ProjectError::AlreadyExists(target.display().to_string()));
        }
        let content = state
            .files
            .get(source)
            .cloned()
            .ok_or_else(|| ProjectError::NotFound(source.display().to_string()))?;
        state.files.insert(target, content);
        state.operations.push(FsOperation::Copy {
            source: source.to_path_buf(),
            target_folder: target_folder.to_path_buf(),
            file_name: file_name.to_string(),
        });
        Ok(())
    }

    async fn list_files(&self, folder: &Path) -> Result<Vec<PathBuf>, ProjectError> {
        let state = self.state();
        state.check(FsPrimitive::List)?;
        Ok(state
            .files
            .keys()
            .filter(|file| file.as_path() != folder && file.starts_with(folder))
            .cloned()
            .collect())
    }
}
