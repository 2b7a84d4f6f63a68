//! Directory-backed dataset source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use wardlens_contracts::error::{WardlensError, WardlensResult};
use wardlens_core::{Dataset, DatasetSource};

/// Reads `<dir>/<dataset>.json`, e.g. `data/imaging_studies.json`.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, dataset: Dataset) -> PathBuf {
        self.dir.join(dataset.file_name())
    }
}

#[async_trait]
impl DatasetSource for JsonDirSource {
    /// Returns `WardlensError::LoadFailed` if the file is missing, unreadable
    /// or not JSON. Any well-formed JSON document is returned as-is.
    async fn fetch(&self, dataset: Dataset) -> WardlensResult<Value> {
        let path = self.path_for(dataset);
        let contents =
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| WardlensError::LoadFailed {
                    dataset: dataset.name().to_string(),
                    reason: format!("cannot read '{}': {}", path.display(), e),
                })?;
        let value = serde_json::from_str(&contents).map_err(|e| WardlensError::LoadFailed {
            dataset: dataset.name().to_string(),
            reason: format!("invalid JSON in '{}': {}", path.display(), e),
        })?;
        debug!(dataset = dataset.name(), bytes = contents.len(), "dataset read");
        Ok(value)
    }
}
