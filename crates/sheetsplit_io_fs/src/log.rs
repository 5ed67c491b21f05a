//! Run log file: the produced output file names, one per line.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::spec::FsIoError;

/// Default run log file name.
pub const C_LOG_FILE_NAME_DEFAULT: &str = "log.txt";

/// Render log content: each name followed by `\n`.
pub fn render_run_log<S: AsRef<str>>(l_names: &[S]) -> String {
    l_names.iter().fold(String::new(), |mut acc, name| {
        acc.push_str(name.as_ref());
        acc.push('\n');
        acc
    })
}

/// Write `l_names` (in order) as UTF-8 text to `<path_dir>/<file_name>`.
///
/// Any existing file is replaced.
pub fn write_run_log<S: AsRef<str>>(
    path_dir: &Path,
    file_name: &str,
    l_names: &[S],
) -> Result<PathBuf, FsIoError> {
    let path_file_log = path_dir.join(file_name);
    fs::write(&path_file_log, render_run_log(l_names)).map_err(|e| FsIoError::WriteFile {
        path: path_file_log.clone(),
        message: e.to_string(),
    })?;
    debug!(path = %path_file_log.display(), n_lines = l_names.len(), "run log written");
    Ok(path_file_log)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_run_log_one_name_per_line() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_file_log = write_run_log(
            tmp.path(),
            C_LOG_FILE_NAME_DEFAULT,
            &["x_p.xlsx", "пустой_фильтр.xlsx"],
        )
        .expect("write log");

        assert_eq!(path_file_log, tmp.path().join("log.txt"));
        let txt = std::fs::read_to_string(&path_file_log).expect("read log");
        assert_eq!(txt, "x_p.xlsx\nпустой_фильтр.xlsx\n");
    }

    #[test]
    fn test_write_run_log_empty_run_creates_empty_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let l_names: [&str; 0] = [];
        let path_file_log =
            write_run_log(tmp.path(), C_LOG_FILE_NAME_DEFAULT, &l_names).expect("write log");
        assert_eq!(std::fs::read_to_string(path_file_log).expect("read"), "");
    }

    #[test]
    fn test_write_run_log_into_missing_dir_fails() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = write_run_log(&tmp.path().join("gone"), C_LOG_FILE_NAME_DEFAULT, &["a"])
            .expect_err("missing dir");
        assert!(matches!(err, FsIoError::WriteFile { .. }));
    }
}
