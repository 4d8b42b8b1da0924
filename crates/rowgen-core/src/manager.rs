use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::dataset::Dataset;
use crate::error::Result;

/// Unordered collection of datasets with a whole-collection persistence
/// round-trip.
///
/// Save and import both gate on the `.json` extension and report refusals
/// as `Ok(false)` instead of an error; a refused save touches no file and a
/// refused import leaves the current collection untouched.
#[derive(Default)]
pub struct DatasetManager {
    datasets: Vec<Dataset>,
}

impl DatasetManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dataset(&mut self, dataset: Dataset) {
        self.datasets.push(dataset);
    }

    pub fn remove_dataset(&mut self, index: usize) -> Option<Dataset> {
        if index < self.datasets.len() {
            Some(self.datasets.remove(index))
        } else {
            None
        }
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    pub fn datasets_mut(&mut self) -> &mut [Dataset] {
        &mut self.datasets
    }

    /// Write every dataset's snapshot into one document keyed by dataset
    /// identity. Returns `Ok(false)` when the path is refused.
    pub fn save_to_file(&self, path: &Path) -> Result<bool> {
        if !is_json_path(path) {
            warn!(path = %path.display(), "save refused: not a .json path");
            return Ok(false);
        }
        let mut document = Map::new();
        for dataset in &self.datasets {
            let (token, snapshot) = dataset.snapshot();
            document.insert(token, snapshot);
        }
        fs::write(path, serde_json::to_vec_pretty(&Value::Object(document))?)?;
        info!(path = %path.display(), datasets = self.datasets.len(), "collection saved");
        Ok(true)
    }

    /// Replace the collection with the contents of a persisted document.
    /// A wrong extension, malformed JSON, unknown field discriminant, or
    /// unknown output format refuses the import with the collection left as
    /// it was.
    pub fn import_file(&mut self, path: &Path) -> Result<bool> {
        if !is_json_path(path) {
            warn!(path = %path.display(), "import refused: not a .json path");
            return Ok(false);
        }
        let contents = fs::read_to_string(path)?;
        let document: Value = match serde_json::from_str(&contents) {
            Ok(document) => document,
            Err(error) => {
                warn!(path = %path.display(), %error, "import refused: malformed document");
                return Ok(false);
            }
        };
        let Some(entries) = document.as_object() else {
            warn!(path = %path.display(), "import refused: document is not an object");
            return Ok(false);
        };

        // Reconstruct into a scratch list first so a bad entry cannot leave
        // the manager half-replaced.
        let mut imported = Vec::with_capacity(entries.len());
        for (token, snapshot) in entries {
            match Dataset::from_snapshot(snapshot) {
                Ok(dataset) => imported.push(dataset),
                Err(error) => {
                    warn!(path = %path.display(), token = %token, %error, "import refused");
                    return Ok(false);
                }
            }
        }

        info!(path = %path.display(), datasets = imported.len(), "collection imported");
        self.datasets = imported;
        Ok(true)
    }
}

fn is_json_path(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("json")
}
