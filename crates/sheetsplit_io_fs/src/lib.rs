//! `sheetsplit_io_fs` v1:
//! Filesystem side of a split run.
//!
//! - `layout` : output directory and file path derivation
//! - `log`    : run log writer
//! - `opener` : best-effort folder opening
//! - `report` : run-time report model
//! - `spec`   : error types

pub mod layout;
pub mod log;
pub mod opener;
pub mod report;
pub mod spec;

pub use layout::{
    C_DIR_PREFIX_DEFAULT, derive_input_base_name, derive_output_dir, derive_output_file_name,
    derive_output_file_path, ensure_output_dir,
};
pub use log::{C_LOG_FILE_NAME_DEFAULT, render_run_log, write_run_log};
pub use opener::{FolderOpener, NoopFolderOpener, SystemFolderOpener};
pub use report::{ReportSplit, ReportSplitBuilder};
pub use spec::{FolderOpenError, FsIoError};
