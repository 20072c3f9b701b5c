//! Staged CSV handoff
//!
//! Serializes filtered trip records to a header-labeled CSV inside the graph
//! store's import directory. The store's bulk-import facility resolves files
//! against its own import root, so only the bare file name is handed
//! downstream. Restaging the same input overwrites the previous file.

use std::fs;
use std::path::Path;

use crate::model::{CSV_COLUMNS, TripRecord};

/// Error type for staging operations
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("Failed to create import directory {path}: {error}")]
    CreateDir { path: String, error: String },

    #[error("Failed to write staged file {path}: {error}")]
    Write { path: String, error: String },

    #[error("Input path has no file name: {0}")]
    InvalidInput(String),
}

/// Result type for staging operations
pub type StageResult<T> = Result<T, StageError>;

/// Staged file name for a source path: base name with the extension
/// replaced by `.csv`.
pub fn staged_file_name(source: &Path) -> StageResult<String> {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| StageError::InvalidInput(source.display().to_string()))?;
    Ok(format!("{stem}.csv"))
}

/// Write `records` as a header-labeled CSV under `import_dir`, returning the
/// bare file name the graph store can resolve.
pub fn stage(
    records: &[TripRecord],
    import_dir: &Path,
    source: &Path,
) -> StageResult<String> {
    let file_name = staged_file_name(source)?;

    fs::create_dir_all(import_dir).map_err(|e| StageError::CreateDir {
        path: import_dir.display().to_string(),
        error: e.to_string(),
    })?;

    let save_path = import_dir.join(&file_name);
    let write_error = |e: String| StageError::Write {
        path: save_path.display().to_string(),
        error: e,
    };

    // Header is written explicitly so an empty batch still stages a valid file.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&save_path)
        .map_err(|e| write_error(e.to_string()))?;
    writer
        .write_record(CSV_COLUMNS)
        .map_err(|e| write_error(e.to_string()))?;
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| write_error(e.to_string()))?;
    }
    writer.flush().map_err(|e| write_error(e.to_string()))?;

    tracing::info!(
        records = records.len(),
        path = %save_path.display(),
        "Staged trip batch"
    );

    Ok(file_name)
}
