//! Split options, run states, grouping models and the run error taxonomy.

use std::fmt;

use sheetsplit_io_fs::{C_DIR_PREFIX_DEFAULT, C_LOG_FILE_NAME_DEFAULT, FsIoError};
use sheetsplit_io_xlsx::{
    EnumCellValue, SpecTable, SpecXlsxReadOptions, SpecXlsxWriteOptions, XlsxReadError,
    XlsxWriteError,
};
use thiserror::Error;

/// Placeholder output name when both filter values sanitize to nothing ("empty_filter").
pub const C_FILTER_NAME_EMPTY_DEFAULT: &str = "пустой_фильтр";
/// Extension of every output workbook.
pub const C_FILE_EXTENSION_DEFAULT: &str = "xlsx";

////////////////////////////////////////////////////////////////////////////////
// #region Options

/// Knobs of one split run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSplitOptions {
    /// Zero-based index of the first filter column.
    pub idx_col_primary: usize,
    /// Zero-based index of the second filter column (normalized to text).
    pub idx_col_secondary: usize,
    /// Minimum accepted column count.
    pub n_cols_min: usize,
    /// Output directory prefix.
    pub dir_prefix: String,
    /// Name used when a filter name resolves to the empty string.
    pub filter_name_empty: String,
    /// Run log file name.
    pub log_file_name: String,
    /// Output workbook extension.
    pub file_extension: String,
    /// Workbook reader options.
    pub read_options: SpecXlsxReadOptions,
    /// Workbook writer options.
    pub write_options: SpecXlsxWriteOptions,
    /// Open the output folder once the run succeeded.
    pub if_open_folder: bool,
}

impl Default for SpecSplitOptions {
    fn default() -> Self {
        Self {
            idx_col_primary: 1,
            idx_col_secondary: 3,
            n_cols_min: 4,
            dir_prefix: C_DIR_PREFIX_DEFAULT.to_string(),
            filter_name_empty: C_FILTER_NAME_EMPTY_DEFAULT.to_string(),
            log_file_name: C_LOG_FILE_NAME_DEFAULT.to_string(),
            file_extension: C_FILE_EXTENSION_DEFAULT.to_string(),
            read_options: SpecXlsxReadOptions::default(),
            write_options: SpecXlsxWriteOptions::default(),
            if_open_folder: true,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RunState

/// Lifecycle of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumRunState {
    /// Not started.
    #[default]
    Idle,
    /// Reading the input workbook.
    Loading,
    /// Checking shape and cleaning the filter columns.
    Validating,
    /// Computing distinct filter keys.
    Grouping,
    /// Creating the output directory and writing one workbook per group.
    WritingFiles,
    /// Writing the run log.
    LoggingResults,
    /// Showing the output directory.
    OpeningFolder,
    /// Finished successfully.
    Done,
    /// Aborted by an error.
    Failed,
}

impl fmt::Display for EnumRunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c_name = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Validating => "validating",
            Self::Grouping => "grouping",
            Self::WritingFiles => "writing_files",
            Self::LoggingResults => "logging_results",
            Self::OpeningFolder => "opening_folder",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        write!(f, "{c_name}")
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region GroupingModels

/// Pair of filter column values identifying one group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpecFilterKey {
    /// Value of the primary filter column.
    pub primary: EnumCellValue,
    /// Value of the secondary filter column.
    pub secondary: EnumCellValue,
}

/// Rows sharing one [`SpecFilterKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecGroup {
    /// Grouping key.
    pub key: SpecFilterKey,
    /// Sanitized output stem derived from the key.
    pub filter_name: String,
    /// Row indices into the cleaned table, ascending.
    pub l_idx_rows: Vec<usize>,
}

impl SpecGroup {
    /// Whether the group selects no rows.
    pub fn is_empty(&self) -> bool {
        self.l_idx_rows.is_empty()
    }
}

/// Output of the row filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecTableCleaned {
    /// Table after normalization and row drop.
    pub table: SpecTable,
    /// Rows removed for missing filter values.
    pub n_rows_dropped: usize,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Fatal run failures.
#[derive(Debug, Error)]
pub enum SplitError {
    /// Input missing, unreadable or not a supported workbook.
    #[error("Failed to load input: {0}")]
    Load(#[from] XlsxReadError),
    /// Input shape rejected.
    #[error("The file must contain at least {n_cols_min} columns (found {n_cols}).")]
    Validation {
        /// Columns found.
        n_cols: usize,
        /// Columns required.
        n_cols_min: usize,
    },
    /// An output workbook could not be written.
    #[error("Failed to write output file: {0}")]
    WriteTable(#[from] XlsxWriteError),
    /// The output directory or the run log could not be written.
    #[error("Failed to write output: {0}")]
    WriteFs(#[from] FsIoError),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
