use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use crate::kernel::constants;
use crate::storage::error::StorageSystemError;
use crate::storage::provider::{ResourceProvider, StorageResult, normalize_resource_path};

const SAMPLE_CONFIG: &[u8] = include_bytes!("../../resources/orderProcessingSample.toml");
const SAMPLE_ORDER: &[u8] = include_bytes!("../../resources/samples/xml/order.xml");

/// In-memory resource provider.
///
/// [`BundledResources::sample`] carries the configuration and order document
/// compiled into the binary, so the sample runs without any files on disk.
#[derive(Debug, Clone, Default)]
pub struct BundledResources {
    entries: BTreeMap<PathBuf, Vec<u8>>,
}

impl BundledResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// The canonical sample: registry configuration plus the multi-item book order.
    pub fn sample() -> Self {
        let mut resources = Self::new();
        resources.entries.insert(
            PathBuf::from(constants::DEFAULT_CONFIG_RESOURCE),
            SAMPLE_CONFIG.to_vec(),
        );
        resources.entries.insert(
            PathBuf::from(constants::DEFAULT_ORDER_RESOURCE),
            SAMPLE_ORDER.to_vec(),
        );
        resources
    }

    /// Add or replace a resource.
    pub fn insert(&mut self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> StorageResult<()> {
        let key = normalize_resource_path(path.as_ref())?;
        self.entries.insert(key, contents.into());
        Ok(())
    }

    pub fn with(mut self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> StorageResult<Self> {
        self.insert(path, contents)?;
        Ok(self)
    }

    pub fn paths(&self) -> Vec<&Path> {
        self.entries.keys().map(PathBuf::as_path).collect()
    }
}

impl ResourceProvider for BundledResources {
    fn name(&self) -> &str {
        "bundled"
    }

    fn exists(&self, path: &Path) -> bool {
        normalize_resource_path(path)
            .map(|key| self.entries.contains_key(&key))
            .unwrap_or(false)
    }

    fn open_read(&self, path: &Path) -> StorageResult<Box<dyn Read + '_>> {
        let key = normalize_resource_path(path)?;
        match self.entries.get(&key) {
            Some(bytes) => Ok(Box::new(Cursor::new(bytes.as_slice()))),
            None => Err(StorageSystemError::FileNotFound(path.to_path_buf())),
        }
    }
}
