//! XLSX constants and default preset factories.

use crate::spec::SpecCellFormat;

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Workbook extensions accepted by the reader (lowercase, no dot).
pub const TUP_EXTENSIONS_SUPPORTED: [&str; 3] = ["xlsx", "xlsm", "xls"];

/// Text cells read as missing by default.
pub const TUP_NA_VALUES_DEFAULT: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Sheet name used when the caller gives none.
pub const C_SHEET_NAME_DEFAULT: &str = "Sheet1";
/// Prefix for header cells that are blank in the source sheet.
pub const C_HEADER_UNNAMED_PREFIX: &str = "Unnamed: ";
/// Number format applied to datetime cells.
pub const C_NUM_FORMAT_DATETIME: &str = "yyyy-mm-dd hh:mm:ss";
/// Text rendering of datetime cells.
pub const C_STRFTIME_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

/// Base preset every other preset is layered onto.
pub fn derive_default_base_format() -> SpecCellFormat {
    SpecCellFormat {
        border: Some(0),
        ..Default::default()
    }
}

/// Header cell preset: bold, centered, thin border.
pub fn derive_default_header_format() -> SpecCellFormat {
    derive_default_base_format().with_(SpecCellFormat {
        bold: Some(true),
        align: Some("center".to_string()),
        border: Some(1),
        ..Default::default()
    })
}

/// Datetime body cell preset.
pub fn derive_default_datetime_format() -> SpecCellFormat {
    derive_default_base_format().with_(SpecCellFormat {
        num_format: Some(C_NUM_FORMAT_DATETIME.to_string()),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_overlay_base_format() {
        let fmt_header = derive_default_header_format();
        assert_eq!(fmt_header.bold, Some(true));
        assert_eq!(fmt_header.border, Some(1));

        let fmt_datetime = derive_default_datetime_format();
        assert_eq!(fmt_datetime.border, Some(0));
        assert_eq!(fmt_datetime.num_format.as_deref(), Some(C_NUM_FORMAT_DATETIME));
    }
}
