//! Output directory layout next to the input workbook.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::spec::FsIoError;

/// Default output directory prefix ("selection_").
pub const C_DIR_PREFIX_DEFAULT: &str = "выборка_";

/// Input file name up to its first `.` (`report.2024.xlsx` -> `report`).
pub fn derive_input_base_name(path_file_in: &Path) -> Result<String, FsIoError> {
    let c_file_name = path_file_in
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| FsIoError::InvalidInputPath(path_file_in.to_path_buf()))?;

    Ok(c_file_name
        .split('.')
        .next()
        .unwrap_or_default()
        .to_string())
}

/// Sibling directory of the input file named `<prefix><base name>`.
pub fn derive_output_dir(path_file_in: &Path, dir_prefix: &str) -> Result<PathBuf, FsIoError> {
    let c_base_name = derive_input_base_name(path_file_in)?;
    let path_dir_parent = path_file_in
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    Ok(path_dir_parent.join(format!("{dir_prefix}{c_base_name}")))
}

/// Create `path_dir` (and parents) if absent. Existing content is left untouched.
pub fn ensure_output_dir(path_dir: &Path) -> Result<(), FsIoError> {
    fs::create_dir_all(path_dir).map_err(|e| FsIoError::CreateDir {
        path: path_dir.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!(path = %path_dir.display(), "output directory ready");
    Ok(())
}

/// `<dir>/<stem>.<extension>`.
pub fn derive_output_file_path(path_dir: &Path, stem: &str, extension: &str) -> PathBuf {
    path_dir.join(derive_output_file_name(stem, extension))
}

/// `<stem>.<extension>`.
pub fn derive_output_file_name(stem: &str, extension: &str) -> String {
    format!("{stem}.{extension}")
}
