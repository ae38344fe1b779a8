use std::fmt::Debug;
use std::io::Read;
use std::path::{Component, Path, PathBuf};

use crate::storage::error::StorageSystemError;

pub type StorageResult<T> = std::result::Result<T, StorageSystemError>;

/// Read-only source of named resources (configuration files, order documents).
///
/// Paths are always relative to the provider's root; absolute paths and `..`
/// components are rejected so a resource name behaves like a classpath entry.
pub trait ResourceProvider: Send + Sync + Debug {
    /// Get the name of this provider
    fn name(&self) -> &str;

    /// Check if a resource exists
    fn exists(&self, path: &Path) -> bool;

    /// Open a resource as a byte stream
    fn open_read(&self, path: &Path) -> StorageResult<Box<dyn Read + '_>>;

    /// Read a resource to a string
    fn read_to_string(&self, path: &Path) -> StorageResult<String> {
        let mut reader = self.open_read(path)?;
        let mut contents = String::new();
        reader
            .read_to_string(&mut contents)
            .map_err(|e| StorageSystemError::io(e, "read_to_string", path.to_path_buf()))?;
        Ok(contents)
    }
}

/// Normalize a resource path, rejecting anything that would escape the provider root.
pub fn normalize_resource_path(path: &Path) -> StorageResult<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(StorageSystemError::InvalidPath {
                    path: path.to_path_buf(),
                    reason: "resource paths must be relative and stay inside the resource root"
                        .to_string(),
                });
            }
        }
    }
    if normalized.as_os_str().is_empty() {
        return Err(StorageSystemError::InvalidPath {
            path: path.to_path_buf(),
            reason: "empty resource path".to_string(),
        });
    }
    Ok(normalized)
}
