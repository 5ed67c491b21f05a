//! XLSX writer kernel that serializes [`SpecTable`] rows into a workbook.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use tracing::debug;

use crate::spec::{
    EnumAutofitColumnsRule, EnumCellValue, SpecAutofitCellsPolicy, SpecCellFormat, SpecTable,
    SpecXlsxReport, SpecXlsxWriteOptions, XlsxWriteError,
};
use crate::util::{
    cast_col_num, cast_row_num, estimate_unicode_string_width, estimate_width_len,
    sanitize_sheet_name,
};

/// Stateful single-sheet workbook writer.
///
/// The workbook is buffered in memory until [`Self::close`] is called.
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    write_options: SpecXlsxWriteOptions,
    report: SpecXlsxReport,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to output path and options.
    pub fn new(path_file_out: PathBuf, write_options: SpecXlsxWriteOptions) -> Self {
        Self {
            path_file_out,
            workbook: Workbook::new(),
            write_options,
            report: SpecXlsxReport::default(),
            if_closed: false,
        }
    }

    /// Output file path.
    pub fn file_out(&self) -> &Path {
        &self.path_file_out
    }

    /// Snapshot of the write report.
    pub fn report(&self) -> SpecXlsxReport {
        self.report.clone()
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> Result<(), XlsxWriteError> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook.save(&self.path_file_out)?;
        self.if_closed = true;
        debug!(path = %self.file_out().display(), "workbook saved");
        Ok(())
    }

    /// Write the selected rows of `table` (in the given order) as the sheet.
    ///
    /// All columns of `table` are written, preceded by a header row when
    /// enabled. No index column is added. A workbook holds one sheet, so a
    /// second call fails with [`XlsxWriteError::SheetWritten`]; so does any
    /// row index past the end of `table`.
    pub fn write_sheet(
        &mut self,
        table: &SpecTable,
        l_idx_rows: &[usize],
    ) -> Result<(), XlsxWriteError> {
        if self.if_closed {
            return Err(XlsxWriteError::Closed);
        }
        if let Some(sheet_name) = &self.report.sheet_name {
            return Err(XlsxWriteError::SheetWritten(sheet_name.clone()));
        }
        validate_policy_autofit(&self.write_options.policy_autofit)?;

        let n_width = table.width();
        let n_rows_header = usize::from(self.write_options.if_write_header);
        let policy_autofit = self.write_options.policy_autofit.clone();
        let fmt_header = derive_rust_xlsx_format(&self.write_options.fmt_header);
        let fmt_datetime = derive_rust_xlsx_format(&self.write_options.fmt_datetime);

        if n_width > 0 {
            cast_col_num(n_width - 1)?;
        }
        cast_row_num((n_rows_header + l_idx_rows.len()).saturating_sub(1))?;
        if let Some(n_idx_row) = l_idx_rows.iter().find(|n| **n >= table.height()) {
            return Err(XlsxWriteError::RowOutOfRange {
                n_idx_row: *n_idx_row,
                n_rows: table.height(),
            });
        }

        let sheet_name = sanitize_sheet_name(&self.write_options.sheet_name, "_");
        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&sheet_name)?;

        let mut l_width_by_col_header = vec![0usize; n_width];
        let mut l_width_by_col_body = vec![0usize; n_width];

        if n_rows_header > 0 {
            for (n_idx_col, c_name) in table.columns.iter().enumerate() {
                worksheet.write_string_with_format(
                    0,
                    cast_col_num(n_idx_col)?,
                    c_name,
                    &fmt_header,
                )?;
                l_width_by_col_header[n_idx_col] = estimate_unicode_string_width(c_name);
            }
            worksheet.set_freeze_panes(1, 0)?;
        }

        let n_rows_autofit_max = policy_autofit
            .height_body_inferred_max
            .unwrap_or(usize::MAX);
        for (n_row_local, n_idx_row) in l_idx_rows.iter().enumerate() {
            let row = &table.rows[*n_idx_row];
            if row.len() != n_width {
                return Err(XlsxWriteError::ColumnMismatch {
                    n_idx_row: *n_idx_row,
                    n_width_row: row.len(),
                    n_width,
                });
            }

            let n_row_out = cast_row_num(n_rows_header + n_row_local)?;
            for (n_idx_col, value) in row.iter().enumerate() {
                write_cell(
                    worksheet,
                    n_row_out,
                    cast_col_num(n_idx_col)?,
                    value,
                    &fmt_datetime,
                )?;
                if n_row_local < n_rows_autofit_max {
                    l_width_by_col_body[n_idx_col] =
                        usize::max(l_width_by_col_body[n_idx_col], estimate_width_len(value));
                }
            }
        }

        apply_column_widths(
            worksheet,
            &policy_autofit,
            &l_width_by_col_header,
            &l_width_by_col_body,
        )?;

        self.report.sheet_name = Some(sheet_name);
        self.report.cnt_rows_written = l_idx_rows.len();
        Ok(())
    }
}

/// Write `l_idx_rows` of `table` into a single-sheet workbook at `path_file_out`.
pub fn write_table_rows(
    path_file_out: impl AsRef<Path>,
    table: &SpecTable,
    l_idx_rows: &[usize],
    write_options: &SpecXlsxWriteOptions,
) -> Result<SpecXlsxReport, XlsxWriteError> {
    let mut writer = XlsxWriter::new(path_file_out.as_ref().to_path_buf(), write_options.clone());
    writer.write_sheet(table, l_idx_rows)?;
    writer.close()?;
    Ok(writer.report())
}

fn write_cell(
    worksheet: &mut Worksheet,
    n_row: u32,
    n_col: u16,
    value: &EnumCellValue,
    fmt_datetime: &Format,
) -> Result<(), XlsxWriteError> {
    match value {
        EnumCellValue::None => {}
        EnumCellValue::String(val) => {
            worksheet.write_string(n_row, n_col, val)?;
        }
        EnumCellValue::Number(val) => {
            worksheet.write_number(n_row, n_col, *val)?;
        }
        EnumCellValue::Boolean(val) => {
            worksheet.write_boolean(n_row, n_col, *val)?;
        }
        EnumCellValue::DateTime(val) => {
            worksheet.write_datetime_with_format(n_row, n_col, val, fmt_datetime)?;
        }
    }
    Ok(())
}

fn apply_column_widths(
    worksheet: &mut Worksheet,
    policy_autofit: &SpecAutofitCellsPolicy,
    l_width_by_col_header: &[usize],
    l_width_by_col_body: &[usize],
) -> Result<(), XlsxWriteError> {
    if matches!(policy_autofit.rule_columns, EnumAutofitColumnsRule::None) {
        return Ok(());
    }

    let n_min = usize::max(1, policy_autofit.width_cell_min);
    let n_max = usize::min(255, usize::max(n_min, policy_autofit.width_cell_max));
    let n_pad = policy_autofit.width_cell_padding;

    for (n_idx_col, n_width_header) in l_width_by_col_header.iter().enumerate() {
        let n_width_body = l_width_by_col_body.get(n_idx_col).copied().unwrap_or(0);
        let n_width_recorded = match policy_autofit.rule_columns {
            EnumAutofitColumnsRule::Header => *n_width_header,
            EnumAutofitColumnsRule::Body => n_width_body,
            EnumAutofitColumnsRule::All => usize::max(*n_width_header, n_width_body),
            EnumAutofitColumnsRule::None => continue,
        };
        let n_width_final = usize::min(n_max, usize::max(n_min, n_width_recorded + n_pad));
        worksheet.set_column_width(cast_col_num(n_idx_col)?, n_width_final as f64)?;
    }
    Ok(())
}

fn validate_policy_autofit(policy_autofit: &SpecAutofitCellsPolicy) -> Result<(), XlsxWriteError> {
    if policy_autofit.width_cell_min == 0 {
        return Err(XlsxWriteError::InvalidPolicy(
            "policy_autofit.width_cell_min must be >= 1.".to_string(),
        ));
    }
    if policy_autofit.width_cell_max < policy_autofit.width_cell_min {
        return Err(XlsxWriteError::InvalidPolicy(
            "policy_autofit.width_cell_max must be >= policy_autofit.width_cell_min.".to_string(),
        ));
    }
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }
    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.clone());
    }
    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        3 => FormatBorder::Dashed,
        4 => FormatBorder::Dotted,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        7 => FormatBorder::Hair,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::reader::read_table;
    use crate::spec::SpecXlsxReadOptions;

    fn build_table() -> SpecTable {
        let dt = NaiveDate::from_ymd_opt(2023, 12, 31)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid datetime");
        SpecTable::new(
            vec!["name".to_string(), "qty".to_string(), "ok".to_string(), "at".to_string()],
            vec![
                vec![
                    EnumCellValue::from("a"),
                    EnumCellValue::Number(1.5),
                    EnumCellValue::Boolean(true),
                    EnumCellValue::DateTime(dt),
                ],
                vec![
                    EnumCellValue::from("b"),
                    EnumCellValue::None,
                    EnumCellValue::Boolean(false),
                    EnumCellValue::None,
                ],
                vec![
                    EnumCellValue::from("c"),
                    EnumCellValue::Number(3.0),
                    EnumCellValue::None,
                    EnumCellValue::None,
                ],
            ],
        )
    }

    #[test]
    fn test_write_selected_rows_keeps_types_and_order() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("subset.xlsx");
        let table = build_table();

        let report = write_table_rows(&path, &table, &[2, 0], &SpecXlsxWriteOptions::default())
            .expect("write workbook");
        assert_eq!(report.cnt_rows_written, 2);
        assert_eq!(report.sheet_name.as_deref(), Some("Sheet1"));

        let table_back = read_table(&path, &SpecXlsxReadOptions::default()).expect("read back");
        assert_eq!(table_back.columns, table.columns);
        assert_eq!(table_back.rows, vec![table.rows[2].clone(), table.rows[0].clone()]);
    }

    #[test]
    fn test_write_after_close_fails_and_close_is_idempotent() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut writer = XlsxWriter::new(
            tmp.path().join("closed.xlsx"),
            SpecXlsxWriteOptions::default(),
        );
        writer.write_sheet(&build_table(), &[0]).expect("write sheet");
        writer.close().expect("close");
        writer.close().expect("second close");

        let err = writer
            .write_sheet(&build_table(), &[1])
            .expect_err("write after close");
        assert!(matches!(err, XlsxWriteError::Closed));
    }

    #[test]
    fn test_second_sheet_is_rejected() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut writer = XlsxWriter::new(
            tmp.path().join("twice.xlsx"),
            SpecXlsxWriteOptions::default(),
        );
        writer.write_sheet(&build_table(), &[0]).expect("first");

        let err = writer
            .write_sheet(&build_table(), &[1])
            .expect_err("one sheet per workbook");
        assert!(matches!(err, XlsxWriteError::SheetWritten(ref name) if name == "Sheet1"));
        assert_eq!(writer.report().cnt_rows_written, 1);
    }

    #[test]
    fn test_row_index_out_of_range_writes_nothing() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("range.xlsx");
        let err = write_table_rows(&path, &build_table(), &[0, 3], &SpecXlsxWriteOptions::default())
            .expect_err("row 3 does not exist");
        assert!(matches!(
            err,
            XlsxWriteError::RowOutOfRange {
                n_idx_row: 3,
                n_rows: 3
            }
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_invalid_autofit_policy_is_rejected() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut options = SpecXlsxWriteOptions::default();
        options.policy_autofit.width_cell_min = 20;
        options.policy_autofit.width_cell_max = 10;

        let err = write_table_rows(tmp.path().join("policy.xlsx"), &build_table(), &[0], &options)
            .expect_err("max below min");
        assert!(matches!(err, XlsxWriteError::InvalidPolicy(_)));
    }

    #[test]
    fn test_save_into_missing_directory_is_write_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = write_table_rows(
            tmp.path().join("no/such/dir/out.xlsx"),
            &build_table(),
            &[0],
            &SpecXlsxWriteOptions::default(),
        )
        .expect_err("save must fail");
        assert!(matches!(err, XlsxWriteError::Xlsx(_)));
    }
}
