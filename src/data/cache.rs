use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::loader::{LoadError, load_file};
use super::model::Dataset;

static EMPTY_DATASET: Dataset = Dataset::empty();

// ---------------------------------------------------------------------------
// DatasetHandle – load once, read many
// ---------------------------------------------------------------------------

/// Owns the base dataset for the lifetime of the application.
///
/// The file is read lazily on the first [`get`](Self::get) and never again;
/// a failed load is cached too, so the error stays inspectable.
pub struct DatasetHandle {
    path: PathBuf,
    cell: OnceLock<Result<Dataset, LoadError>>,
}

impl DatasetHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The loaded dataset, or the error that prevented loading it.
    pub fn get(&self) -> Result<&Dataset, &LoadError> {
        self.cell
            .get_or_init(|| {
                let result = load_file(&self.path);
                if let Err(e) = &result {
                    log::error!("Failed to load {}: {e}", self.path.display());
                }
                result
            })
            .as_ref()
    }

    /// The dataset for display purposes: a failed load reads as empty.
    pub fn dataset_or_empty(&self) -> &Dataset {
        self.get().unwrap_or(&EMPTY_DATASET)
    }

    /// The load error, if loading failed.
    pub fn error(&self) -> Option<&LoadError> {
        self.get().err()
    }
}
