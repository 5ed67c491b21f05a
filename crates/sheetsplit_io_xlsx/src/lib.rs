//! `sheetsplit_io_xlsx` v1:
//! Rust-side XLSX read/write kernel.
//!
//! - `conf`   : constants and default presets
//! - `spec`   : cell/table models, options, reports, errors
//! - `util`   : pure helper functions
//! - `reader` : workbook -> table loader (calamine)
//! - `writer` : table -> workbook writer (rust_xlsxwriter)
pub mod conf;
pub mod reader;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    C_SHEET_NAME_DEFAULT, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    TUP_EXCEL_ILLEGAL, TUP_EXTENSIONS_SUPPORTED, TUP_NA_VALUES_DEFAULT,
};
pub use reader::read_table;
pub use spec::{
    EnumAutofitColumnsRule, EnumCellValue, SpecAutofitCellsPolicy, SpecCellFormat, SpecTable,
    SpecXlsxReadOptions, SpecXlsxReport, SpecXlsxWriteOptions, XlsxReadError, XlsxWriteError,
};
pub use util::{derive_header_names, derive_supported_extension, sanitize_sheet_name};
pub use writer::{XlsxWriter, write_table_rows};
