// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Dashboard data output

use std::fs;
use std::path::{Path, PathBuf};

use permwatch_git::History;
use thiserror::Error;
use tracing::debug;

/// File name written inside the output directory
pub const OUTPUT_FILE: &str = "data.json";

/// Output errors
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to create the output directory
    #[error("Failed to create output directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to write the output file
    #[error("Failed to write {0}: {1}")]
    Write(PathBuf, std::io::Error),
}

/// Write `history` as pretty-printed JSON into `output_dir`
///
/// The directory is created if absent. Returns the path of the written file.
///
/// # Errors
///
/// Returns `OutputError` if the directory cannot be created or the file
/// cannot be written.
pub fn write_history(output_dir: &Path, history: &History) -> Result<PathBuf, OutputError> {
    if !output_dir.is_dir() {
        fs::create_dir_all(output_dir)
            .map_err(|e| OutputError::CreateDir(output_dir.to_path_buf(), e))?;
    }

    let output_file = output_dir.join(OUTPUT_FILE);
    let json = serde_json::to_string_pretty(history)?;
    fs::write(&output_file, json).map_err(|e| OutputError::Write(output_file.clone(), e))?;

    debug!(path = %output_file.display(), records = history.len(), "Wrote history");
    Ok(output_file)
}
