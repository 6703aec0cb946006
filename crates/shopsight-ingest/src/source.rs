//! Catalog source providers.
//!
//! A [`CatalogSource`] yields named tabular files in a stable order. The
//! store runs providers on a blocking task, so implementations are free to
//! do synchronous I/O.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::IngestError;
use crate::types::{RawRow, SourceFile};

/// Supplies the raw per-category files of one catalog export.
pub trait CatalogSource {
    /// Returns every readable source file, in a deterministic order.
    ///
    /// Individual unreadable files are expected to be skipped (and logged)
    /// by the implementation; only a provider-level failure is an error.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError`] when the provider itself is unreachable.
    fn sources(&self) -> Result<Vec<SourceFile>, IngestError>;
}

/// Reads `*.csv` files from a local directory, one file per category.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Decodes one CSV file into header-keyed rows.
    ///
    /// Row-level decode errors are logged and skipped; the rest of the file
    /// still loads.
    fn read_file(path: &Path) -> Result<SourceFile, IngestError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let file = File::open(path).map_err(|source| IngestError::FileOpen {
            path: path.display().to_string(),
            source,
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|source| IngestError::Header {
                path: path.display().to_string(),
                source,
            })?
            .clone();

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            match result {
                Ok(record) => {
                    let mut row = RawRow::new();
                    for (column, value) in headers.iter().zip(record.iter()) {
                        row.insert(column, value);
                    }
                    rows.push(row);
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        row = index + 2,
                        error = %e,
                        "skipping malformed CSV record"
                    );
                }
            }
        }

        Ok(SourceFile { name, rows })
    }
}

impl CatalogSource for DirectorySource {
    fn sources(&self) -> Result<Vec<SourceFile>, IngestError> {
        let entries = std::fs::read_dir(&self.dir).map_err(|source| IngestError::DataDir {
            path: self.dir.display().to_string(),
            source,
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "csv"))
            .collect();
        // Directory iteration order is platform-dependent; sort for a
        // deterministic catalog.
        paths.sort();

        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            match Self::read_file(&path) {
                Ok(file) => files.push(file),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable source file");
                }
            }
        }
        Ok(files)
    }
}
