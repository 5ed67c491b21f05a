//! Stateless helper utilities used by the XLSX reader and writer.

use std::collections::BTreeMap;
use std::path::Path;

use crate::conf::{
    C_HEADER_UNNAMED_PREFIX, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    TUP_EXCEL_ILLEGAL, TUP_EXTENSIONS_SUPPORTED,
};
use crate::spec::{EnumCellValue, XlsxWriteError};

////////////////////////////////////////////////////////////////////////////////
// #region InputValidation

/// Lowercased extension of `path` when it is a supported workbook type.
pub fn derive_supported_extension(path: &Path) -> Option<String> {
    let c_ext = path.extension()?.to_string_lossy().to_ascii_lowercase();
    TUP_EXTENSIONS_SUPPORTED
        .contains(&c_ext.as_str())
        .then_some(c_ext)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region HeaderNormalization

/// Turn raw header cells into unique column names.
///
/// Blank cells become `Unnamed: <idx>`; repeated names get `.1`, `.2`, ...
/// suffixes in order of appearance.
pub fn derive_header_names(l_cells_header: &[EnumCellValue]) -> Vec<String> {
    let mut dict_seen: BTreeMap<String, usize> = BTreeMap::new();
    let mut l_names = Vec::with_capacity(l_cells_header.len());

    for (n_idx_col, cell) in l_cells_header.iter().enumerate() {
        let mut c_name = cell.to_text();
        if c_name.trim().is_empty() {
            c_name = format!("{C_HEADER_UNNAMED_PREFIX}{n_idx_col}");
        }

        let c_name_base = c_name.clone();
        while let Some(n_dup) = dict_seen.get(&c_name).copied() {
            dict_seen.insert(c_name.clone(), n_dup + 1);
            c_name = format!("{c_name_base}.{}", n_dup + 1);
        }
        dict_seen.insert(c_name.clone(), 0);
        l_names.push(c_name);
    }

    l_names
}

/// Whether `value` is one of the configured NA tokens.
pub fn is_na_token(value: &str, na_values: &[String]) -> bool {
    na_values.iter().any(|token| token == value)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().trim_matches('\'').to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WidthEstimation

/// Estimate displayed width units for one cell value.
pub fn estimate_width_len(value: &EnumCellValue) -> usize {
    match value {
        EnumCellValue::None => 0,
        EnumCellValue::DateTime(_) => 19,
        _ => estimate_unicode_string_width(&value.to_text()),
    }
}

/// Count non-ASCII characters as 1.6 units wide.
pub fn estimate_unicode_string_width(s: &str) -> usize {
    let n_ascii = s.chars().filter(|chr| chr.is_ascii()).count();
    let n_non_ascii = s.chars().count().saturating_sub(n_ascii);
    n_ascii + (n_non_ascii as f64 * 1.6).round() as usize
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region GridCasting

pub(crate) fn cast_row_num(value: usize) -> Result<u32, XlsxWriteError> {
    if value >= N_NROWS_EXCEL_MAX {
        return Err(XlsxWriteError::IndexOverflow { axis: "row", value });
    }
    u32::try_from(value).map_err(|_| XlsxWriteError::IndexOverflow { axis: "row", value })
}

pub(crate) fn cast_col_num(value: usize) -> Result<u16, XlsxWriteError> {
    if value >= N_NCOLS_EXCEL_MAX {
        return Err(XlsxWriteError::IndexOverflow {
            axis: "column",
            value,
        });
    }
    u16::try_from(value).map_err(|_| XlsxWriteError::IndexOverflow {
        axis: "column",
        value,
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_header_names_fills_blanks_and_dedupes() {
        let l_cells = vec![
            EnumCellValue::from("id"),
            EnumCellValue::None,
            EnumCellValue::from("id"),
            EnumCellValue::Number(2024.0),
            EnumCellValue::from("id"),
        ];

        assert_eq!(
            derive_header_names(&l_cells),
            vec!["id", "Unnamed: 1", "id.1", "2024", "id.2"]
        );
    }

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("a/b:c", "_"), "a_b_c");
        assert_eq!(sanitize_sheet_name("  ", "_"), "Sheet");
        assert_eq!(sanitize_sheet_name(&"x".repeat(40), "_").len(), 31);
    }

    #[test]
    fn test_supported_extension_is_case_insensitive() {
        assert_eq!(
            derive_supported_extension(Path::new("/d/book.XLSX")).as_deref(),
            Some("xlsx")
        );
        assert_eq!(
            derive_supported_extension(Path::new("old.xls")).as_deref(),
            Some("xls")
        );
        assert_eq!(derive_supported_extension(Path::new("data.csv")), None);
        assert_eq!(derive_supported_extension(Path::new("noext")), None);
    }

    #[test]
    fn test_cast_rejects_excel_overflow() {
        assert!(cast_row_num(N_NROWS_EXCEL_MAX - 1).is_ok());
        assert!(cast_row_num(N_NROWS_EXCEL_MAX).is_err());
        assert!(cast_col_num(N_NCOLS_EXCEL_MAX).is_err());
    }
}
