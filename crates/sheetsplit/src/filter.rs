//! Shape validation and missing-value cleanup of the two filter columns.

use sheetsplit_io_xlsx::{EnumCellValue, SpecTable};
use tracing::debug;

use crate::spec::{SpecSplitOptions, SpecTableCleaned, SplitError};

/// Reject tables narrower than `options.n_cols_min`.
pub fn validate_shape(table: &SpecTable, options: &SpecSplitOptions) -> Result<(), SplitError> {
    let n_cols_min = options
        .n_cols_min
        .max(options.idx_col_primary + 1)
        .max(options.idx_col_secondary + 1);
    if table.width() < n_cols_min {
        return Err(SplitError::Validation {
            n_cols: table.width(),
            n_cols_min,
        });
    }
    Ok(())
}

/// Validate, normalize the secondary column to text and drop incomplete rows.
///
/// 1. Secondary column: missing becomes `""`, every other value its text.
/// 2. Rows whose primary or secondary value is missing are removed; since
///    step 1 leaves no missing secondary value, only a missing primary value
///    removes a row.
///
/// Row order and the types of all other columns are preserved.
pub fn clean_table(
    table: SpecTable,
    options: &SpecSplitOptions,
) -> Result<SpecTableCleaned, SplitError> {
    validate_shape(&table, options)?;

    let n_idx_primary = options.idx_col_primary;
    let n_idx_secondary = options.idx_col_secondary;
    let n_rows_in = table.height();

    let SpecTable { columns, rows } = table;
    let rows: Vec<Vec<EnumCellValue>> = rows
        .into_iter()
        .map(|mut row| {
            let value = std::mem::take(&mut row[n_idx_secondary]);
            row[n_idx_secondary] = EnumCellValue::String(value.to_text());
            row
        })
        .filter(|row| !row[n_idx_primary].is_missing() && !row[n_idx_secondary].is_missing())
        .collect();

    let n_rows_dropped = n_rows_in - rows.len();
    debug!(n_rows_in, n_rows_dropped, "filter columns cleaned");

    Ok(SpecTableCleaned {
        table: SpecTable { columns, rows },
        n_rows_dropped,
    })
}
