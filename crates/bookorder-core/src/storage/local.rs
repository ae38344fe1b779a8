use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::storage::error::StorageSystemError;
use crate::storage::provider::{ResourceProvider, StorageResult, normalize_resource_path};

/// Local filesystem resource provider rooted at a directory
#[derive(Clone)]
pub struct LocalResourceProvider {
    base_path: PathBuf,
}

impl LocalResourceProvider {
    /// Create a new local resource provider with the given base path
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolve a relative resource path against the base path
    fn resolve_path(&self, path: &Path) -> StorageResult<PathBuf> {
        Ok(self.base_path.join(normalize_resource_path(path)?))
    }
}

impl ResourceProvider for LocalResourceProvider {
    fn name(&self) -> &str {
        "local"
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve_path(path).map(|p| p.is_file()).unwrap_or(false)
    }

    fn open_read(&self, path: &Path) -> StorageResult<Box<dyn Read + '_>> {
        let full_path = self.resolve_path(path)?;
        if full_path.is_dir() {
            return Err(StorageSystemError::InvalidPath {
                path: path.to_path_buf(),
                reason: "resource is a directory".to_string(),
            });
        }
        log::debug!("Opening resource {}", full_path.display());
        let file = File::open(&full_path)
            .map_err(|e| StorageSystemError::io(e, "open_read", path.to_path_buf()))?;
        Ok(Box::new(file))
    }
}

impl fmt::Debug for LocalResourceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalResourceProvider")
            .field("base_path", &self.base_path)
            .finish()
    }
}
