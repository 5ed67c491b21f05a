//! Partition rows by the distinct pairs of filter column values.

use std::collections::HashMap;

use sheetsplit_io_xlsx::{EnumCellValue, SpecTable};

use crate::sanitize::sanitize_cell;
use crate::spec::{SpecFilterKey, SpecGroup, SpecSplitOptions};

/// Output stem for a key: `sanitize(primary)_sanitize(secondary)` with
/// leading/trailing underscores stripped, or `filter_name_empty` when
/// nothing is left.
pub fn derive_filter_name(key: &SpecFilterKey, filter_name_empty: &str) -> String {
    let c_name = format!("{}_{}", sanitize_cell(&key.primary), sanitize_cell(&key.secondary));
    let c_name = c_name.trim_matches('_');
    if c_name.is_empty() {
        return filter_name_empty.to_string();
    }
    c_name.to_string()
}

/// Groups in first-seen key order; each group lists all matching rows.
///
/// Keys compare with [`EnumCellValue`] equality, so two missing values
/// fall in the same group.
pub fn plan_groups(table: &SpecTable, options: &SpecSplitOptions) -> Vec<SpecGroup> {
    let mut dict_idx_group: HashMap<SpecFilterKey, usize> = HashMap::new();
    let mut l_groups: Vec<SpecGroup> = Vec::new();

    for (n_idx_row, row) in table.rows.iter().enumerate() {
        let key = derive_filter_key(row, options);
        let n_idx_group = *dict_idx_group.entry(key.clone()).or_insert_with(|| {
            l_groups.push(SpecGroup {
                filter_name: derive_filter_name(&key, &options.filter_name_empty),
                key,
                l_idx_rows: Vec::new(),
            });
            l_groups.len() - 1
        });
        l_groups[n_idx_group].l_idx_rows.push(n_idx_row);
    }

    l_groups
}

fn derive_filter_key(row: &[EnumCellValue], options: &SpecSplitOptions) -> SpecFilterKey {
    SpecFilterKey {
        primary: row
            .get(options.idx_col_primary)
            .cloned()
            .unwrap_or_default(),
        secondary: row
            .get(options.idx_col_secondary)
            .cloned()
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::C_FILTER_NAME_EMPTY_DEFAULT;

    fn row(primary: EnumCellValue, secondary: EnumCellValue) -> Vec<EnumCellValue> {
        vec![EnumCellValue::None, primary, EnumCellValue::None, secondary]
    }

    fn build_table(l_rows: Vec<Vec<EnumCellValue>>) -> SpecTable {
        SpecTable::new(
            ["A", "B", "C", "D"].iter().map(ToString::to_string).collect(),
            l_rows,
        )
    }

    #[test]
    fn test_groups_follow_first_seen_order_and_collect_all_rows() {
        let table = build_table(vec![
            row("x".into(), "p".into()),
            row("x".into(), "p".into()),
            row("y".into(), "q".into()),
            row("x".into(), "p".into()),
            row("x".into(), "q".into()),
        ]);

        let l_groups = plan_groups(&table, &SpecSplitOptions::default());
        let l_summary: Vec<(&str, Vec<usize>)> = l_groups
            .iter()
            .map(|g| (g.filter_name.as_str(), g.l_idx_rows.clone()))
            .collect();
        assert_eq!(
            l_summary,
            vec![
                ("x_p", vec![0, 1, 3]),
                ("y_q", vec![2]),
                ("x_q", vec![4]),
            ]
        );
    }

    #[test]
    fn test_groups_partition_rows_exactly_once() {
        let table = build_table(
            (0..40)
                .map(|n| {
                    let secondary = EnumCellValue::String(format!("k{}", n % 4));
                    row(EnumCellValue::Number((n % 3) as f64), secondary)
                })
                .collect(),
        );

        let l_groups = plan_groups(&table, &SpecSplitOptions::default());
        assert_eq!(l_groups.len(), 12);

        let mut l_idx_all: Vec<usize> = l_groups
            .iter()
            .flat_map(|g| g.l_idx_rows.iter().copied())
            .collect();
        l_idx_all.sort_unstable();
        assert_eq!(l_idx_all, (0..40).collect::<Vec<_>>());
    }

    #[test]
    fn test_missing_values_group_together() {
        let table = build_table(vec![
            row(EnumCellValue::None, "p".into()),
            row("x".into(), "p".into()),
            row(EnumCellValue::None, "p".into()),
            row(EnumCellValue::Number(f64::NAN), "p".into()),
            row(EnumCellValue::Number(f64::NAN), "p".into()),
        ]);

        let l_groups = plan_groups(&table, &SpecSplitOptions::default());
        assert_eq!(l_groups.len(), 3);
        assert_eq!(l_groups[0].l_idx_rows, vec![0, 2]);
        assert_eq!(l_groups[0].filter_name, "p");
        assert_eq!(l_groups[2].l_idx_rows, vec![3, 4]);
    }

    #[test]
    fn test_filter_name_strips_underscores_and_falls_back_to_placeholder() {
        let key = |p: EnumCellValue, s: EnumCellValue| SpecFilterKey {
            primary: p,
            secondary: s,
        };

        assert_eq!(
            derive_filter_name(&key("x".into(), "".into()), C_FILTER_NAME_EMPTY_DEFAULT),
            "x"
        );
        assert_eq!(
            derive_filter_name(&key("_a_".into(), "b/c".into()), C_FILTER_NAME_EMPTY_DEFAULT),
            "a__b_c"
        );
        assert_eq!(
            derive_filter_name(&key("  ".into(), "".into()), C_FILTER_NAME_EMPTY_DEFAULT),
            C_FILTER_NAME_EMPTY_DEFAULT
        );
        assert_eq!(
            derive_filter_name(&key("?".into(), "|".into()), C_FILTER_NAME_EMPTY_DEFAULT),
            C_FILTER_NAME_EMPTY_DEFAULT
        );
    }
}
