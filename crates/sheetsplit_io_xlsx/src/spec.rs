//! Shared XLSX models: cell values, tables, options, reports and errors.

use std::hash::{Hash, Hasher};
use std::path::PathBuf;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::conf::{
    C_SHEET_NAME_DEFAULT, C_STRFTIME_DATETIME, TUP_NA_VALUES_DEFAULT,
    derive_default_datetime_format, derive_default_header_format,
};

////////////////////////////////////////////////////////////////////////////////
// #region CellValue

/// Normalized cell value shared by the reader, the split pipeline and the writer.
///
/// Equality is defined per variant and is total: a missing value equals any
/// other missing value, and numbers compare by their canonical bit pattern so
/// that `NaN == NaN` and `-0.0 == 0.0`. Values of different variants never
/// compare equal (`Number(1.0) != String("1")`).
#[derive(Debug, Clone, Default)]
pub enum EnumCellValue {
    /// Missing/blank value.
    #[default]
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Boolean(bool),
    /// Date/time value.
    DateTime(NaiveDateTime),
}

impl EnumCellValue {
    /// Whether this cell is missing.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Render the cell as text; missing renders as the empty string.
    ///
    /// Integral finite numbers are rendered without a fractional part
    /// (`5.0` -> `"5"`).
    pub fn to_text(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::String(val) => val.clone(),
            Self::Number(val) => convert_number_to_text(*val),
            Self::Boolean(val) => if *val { "True" } else { "False" }.to_string(),
            Self::DateTime(val) => val.format(C_STRFTIME_DATETIME).to_string(),
        }
    }
}

fn convert_number_to_text(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e15 {
        return format!("{}", x as i64);
    }
    x.to_string()
}

fn canonical_number_bits(x: f64) -> u64 {
    if x.is_nan() {
        return f64::NAN.to_bits();
    }
    if x == 0.0 {
        return 0.0f64.to_bits();
    }
    x.to_bits()
}

impl PartialEq for EnumCellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => {
                canonical_number_bits(*a) == canonical_number_bits(*b)
            }
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for EnumCellValue {}

impl Hash for EnumCellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::None => {}
            Self::String(val) => val.hash(state),
            Self::Number(val) => canonical_number_bits(*val).hash(state),
            Self::Boolean(val) => val.hash(state),
            Self::DateTime(val) => val.hash(state),
        }
    }
}

impl From<&str> for EnumCellValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<f64> for EnumCellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Table

/// In-memory flat table: one header row plus equally wide body rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecTable {
    /// Column names in sheet order.
    pub columns: Vec<String>,
    /// Body rows; every row has `columns.len()` cells.
    pub rows: Vec<Vec<EnumCellValue>>,
}

impl SpecTable {
    /// Build a table, padding or truncating rows to the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<EnumCellValue>>) -> Self {
        let n_width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(n_width, EnumCellValue::None);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of body rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Cell at `(n_idx_row, n_idx_col)`, if in range.
    pub fn cell(&self, n_idx_row: usize, n_idx_col: usize) -> Option<&EnumCellValue> {
        self.rows.get(n_idx_row).and_then(|row| row.get(n_idx_col))
    }

    /// Iterate one column top to bottom.
    pub fn column(&self, n_idx_col: usize) -> impl Iterator<Item = &EnumCellValue> + '_ {
        self.rows.iter().filter_map(move |row| row.get(n_idx_col))
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification converted to a `rust_xlsxwriter::Format` at write time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Horizontal alignment.
    pub align: Option<String>,
    /// Border style for all sides.
    pub border: Option<i64>,
    /// Number format code.
    pub num_format: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            align: other.align.clone().or_else(|| self.align.clone()),
            border: other.border.or(self.border),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReadOptions

/// Options for [`crate::reader::read_table`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxReadOptions {
    /// Text cells (exact match) read as missing values.
    pub na_values: Vec<String>,
    /// Pad empty leading columns so indices line up with sheet columns A, B, ...
    pub if_pad_leading_columns: bool,
}

impl Default for SpecXlsxReadOptions {
    fn default() -> Self {
        Self {
            na_values: TUP_NA_VALUES_DEFAULT.iter().map(ToString::to_string).collect(),
            if_pad_leading_columns: true,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WriteOptions

/// Autofit rule for column width inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumAutofitColumnsRule {
    /// Disable autofit.
    None,
    /// Infer width from header cells only (default).
    #[default]
    Header,
    /// Infer width from body cells only.
    Body,
    /// Infer width from both header and body cells.
    All,
}

/// Autofit policy for one written sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecAutofitCellsPolicy {
    /// Autofit width inference rule.
    pub rule_columns: EnumAutofitColumnsRule,
    /// Max body rows inspected when body-based inference is active.
    pub height_body_inferred_max: Option<usize>,
    /// Minimum final width.
    pub width_cell_min: usize,
    /// Maximum final width.
    pub width_cell_max: usize,
    /// Width padding added after inference.
    pub width_cell_padding: usize,
}

impl Default for SpecAutofitCellsPolicy {
    fn default() -> Self {
        Self {
            rule_columns: EnumAutofitColumnsRule::Header,
            height_body_inferred_max: Some(20_000),
            width_cell_min: 8,
            width_cell_max: 60,
            width_cell_padding: 2,
        }
    }
}

/// Writer options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxWriteOptions {
    /// Worksheet name (sanitized before use).
    pub sheet_name: String,
    /// Emit the header row with column names.
    pub if_write_header: bool,
    /// Column autofit policy.
    pub policy_autofit: SpecAutofitCellsPolicy,
    /// Header cell format.
    pub fmt_header: SpecCellFormat,
    /// Datetime body cell format.
    pub fmt_datetime: SpecCellFormat,
}

impl Default for SpecXlsxWriteOptions {
    fn default() -> Self {
        Self {
            sheet_name: C_SHEET_NAME_DEFAULT.to_string(),
            if_write_header: true,
            policy_autofit: SpecAutofitCellsPolicy::default(),
            fmt_header: derive_default_header_format(),
            fmt_datetime: derive_default_datetime_format(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Per-workbook write report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Sanitized name of the sheet, once written.
    pub sheet_name: Option<String>,
    /// Body rows written.
    pub cnt_rows_written: usize,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Failures while loading a workbook into a [`SpecTable`].
#[derive(Debug, Error)]
pub enum XlsxReadError {
    /// Extension is not one of `xlsx`, `xlsm`, `xls`.
    #[error("Unsupported file format '{extension}': {}", path.display())]
    UnsupportedFormat {
        /// Input path.
        path: PathBuf,
        /// Extension as found on the path.
        extension: String,
    },
    /// File missing, unreadable or not a valid workbook.
    #[error("Failed to open workbook {}: {message}", path.display())]
    Open {
        /// Input path.
        path: PathBuf,
        /// Underlying reader error text.
        message: String,
    },
    /// Workbook contains no worksheet.
    #[error("Workbook has no worksheet: {}", .0.display())]
    NoWorksheet(PathBuf),
    /// First worksheet could not be decoded.
    #[error("Failed to read worksheet '{sheet_name}': {message}")]
    Worksheet {
        /// Worksheet name.
        sheet_name: String,
        /// Underlying reader error text.
        message: String,
    },
}

/// Failures while writing a workbook.
#[derive(Debug, Error)]
pub enum XlsxWriteError {
    /// `write_sheet` called after `close`.
    #[error("Cannot write after close().")]
    Closed,
    /// `write_sheet` called on a workbook that already holds its sheet.
    #[error("Sheet '{0}' already written; one sheet per workbook.")]
    SheetWritten(String),
    /// Error reported by `rust_xlsxwriter`, including the final save.
    #[error("xlsx write error: {0}")]
    Xlsx(String),
    /// Autofit policy bounds are inconsistent.
    #[error("Invalid autofit policy: {0}")]
    InvalidPolicy(String),
    /// Selected row index past the last body row.
    #[error("Row index {n_idx_row} out of range for {n_rows} rows")]
    RowOutOfRange {
        /// Offending row index.
        n_idx_row: usize,
        /// Body rows in the table.
        n_rows: usize,
    },
    /// Row/column index outside the Excel grid.
    #[error("{axis} index overflow: {value}")]
    IndexOverflow {
        /// `row` or `column`.
        axis: &'static str,
        /// Offending index.
        value: usize,
    },
    /// A body row is wider or narrower than the header.
    #[error("Row {n_idx_row} has {n_width_row} cells, expected {n_width}")]
    ColumnMismatch {
        /// Offending row index.
        n_idx_row: usize,
        /// Width of that row.
        n_width_row: usize,
        /// Header width.
        n_width: usize,
    },
}

impl From<rust_xlsxwriter::XlsxError> for XlsxWriteError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Xlsx(err.to_string())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
