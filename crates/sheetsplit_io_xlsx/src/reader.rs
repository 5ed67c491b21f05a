//! Workbook reader: first worksheet of an `xlsx`/`xlsm`/`xls` file into a [`SpecTable`].

use std::path::Path;

use calamine::{CellErrorType, Data, Reader, open_workbook_auto};
use chrono::NaiveDateTime;
use tracing::debug;

use crate::spec::{EnumCellValue, SpecTable, SpecXlsxReadOptions, XlsxReadError};
use crate::util::{derive_header_names, derive_supported_extension, is_na_token};

/// Load the first worksheet of `path`.
///
/// The first used row is the header; every following row is a body row.
/// Body rows are padded to the header width (and the header to the widest
/// row), so every row of the result has the same length.
pub fn read_table(
    path: impl AsRef<Path>,
    options: &SpecXlsxReadOptions,
) -> Result<SpecTable, XlsxReadError> {
    let path = path.as_ref();
    if derive_supported_extension(path).is_none() {
        return Err(XlsxReadError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension: path
                .extension()
                .map(|ext| ext.to_string_lossy().to_string())
                .unwrap_or_default(),
        });
    }

    let mut workbook = open_workbook_auto(path).map_err(|err| XlsxReadError::Open {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| XlsxReadError::NoWorksheet(path.to_path_buf()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|err| XlsxReadError::Worksheet {
            sheet_name: sheet_name.clone(),
            message: err.to_string(),
        })?;

    let n_cols_pad = match (options.if_pad_leading_columns, range.start()) {
        (true, Some((_, n_col_start))) => n_col_start as usize,
        _ => 0,
    };

    let mut l_rows = range.rows().map(|row| {
        let mut l_cells = vec![EnumCellValue::None; n_cols_pad];
        l_cells.extend(row.iter().map(|data| convert_data_to_cell(data, options)));
        l_cells
    });

    let Some(mut l_cells_header) = l_rows.next() else {
        debug!(sheet = %sheet_name, "worksheet is empty");
        return Ok(SpecTable::default());
    };
    let l_rows_body: Vec<Vec<EnumCellValue>> = l_rows.collect();

    let n_width = l_rows_body
        .iter()
        .map(Vec::len)
        .fold(l_cells_header.len(), usize::max);
    l_cells_header.resize(n_width, EnumCellValue::None);

    let table = SpecTable::new(derive_header_names(&l_cells_header), l_rows_body);
    debug!(
        sheet = %sheet_name,
        n_rows = table.height(),
        n_cols = table.width(),
        "worksheet loaded"
    );
    Ok(table)
}

fn convert_data_to_cell(data: &Data, options: &SpecXlsxReadOptions) -> EnumCellValue {
    match data {
        Data::Empty => EnumCellValue::None,
        Data::Int(val) => EnumCellValue::Number(*val as f64),
        Data::Float(val) => EnumCellValue::Number(*val),
        Data::Bool(val) => EnumCellValue::Boolean(*val),
        Data::String(val) => {
            if is_na_token(val, &options.na_values) {
                EnumCellValue::None
            } else {
                EnumCellValue::String(val.clone())
            }
        }
        Data::DateTime(val) => {
            if val.is_duration() {
                return EnumCellValue::Number(val.as_f64());
            }
            match val.as_datetime() {
                Some(dt) => EnumCellValue::DateTime(dt),
                None => EnumCellValue::Number(val.as_f64()),
            }
        }
        Data::DateTimeIso(val) => parse_iso_datetime(val)
            .map(EnumCellValue::DateTime)
            .unwrap_or_else(|| EnumCellValue::String(val.clone())),
        Data::DurationIso(val) => EnumCellValue::String(val.clone()),
        Data::Error(CellErrorType::NA) => EnumCellValue::None,
        Data::Error(err) => EnumCellValue::String(err.to_string()),
    }
}

fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_table_rejects_unsupported_extension() {
        let err = read_table("/tmp/data.csv", &SpecXlsxReadOptions::default())
            .expect_err("csv must be rejected");
        assert!(matches!(
            err,
            XlsxReadError::UnsupportedFormat { ref extension, .. } if extension == "csv"
        ));
    }

    #[test]
    fn test_read_table_missing_file_is_open_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = read_table(tmp.path().join("absent.xlsx"), &SpecXlsxReadOptions::default())
            .expect_err("missing file must fail");
        assert!(matches!(err, XlsxReadError::Open { .. }));
    }

    #[test]
    fn test_convert_data_maps_na_tokens_and_errors() {
        let options = SpecXlsxReadOptions::default();
        assert_eq!(
            convert_data_to_cell(&Data::String("NA".to_string()), &options),
            EnumCellValue::None
        );
        assert_eq!(
            convert_data_to_cell(&Data::String("x".to_string()), &options),
            EnumCellValue::from("x")
        );
        assert_eq!(
            convert_data_to_cell(&Data::Error(CellErrorType::NA), &options),
            EnumCellValue::None
        );
        assert_eq!(
            convert_data_to_cell(&Data::Int(7), &options),
            EnumCellValue::Number(7.0)
        );
        assert_eq!(
            convert_data_to_cell(&Data::DateTimeIso("2024-01-02T03:04:05".to_string()), &options)
                .to_text(),
            "2024-01-02 03:04:05"
        );
    }
}
