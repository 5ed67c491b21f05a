//! Split run report model and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use tracing::warn;

/// Aggregate counters and the ordered file list for one split run.
#[derive(Debug, Default, Clone)]
pub struct ReportSplit {
    /// Directory the files were written to.
    pub path_dir_out: PathBuf,
    /// Run log path, once written.
    pub path_file_log: Option<PathBuf>,
    /// Output file names in processing order (the run log content).
    pub files: Vec<String>,
    /// Body rows read from the input.
    pub cnt_rows_read: u64,
    /// Rows removed by the missing-value filter.
    pub cnt_rows_dropped: u64,
    /// Distinct filter keys found.
    pub cnt_groups: u64,
    /// Output files written.
    pub cnt_files_written: u64,
    /// Groups skipped because they selected no rows.
    pub cnt_groups_empty: u64,
    /// Non-fatal warnings collected during the run.
    pub warnings: Vec<String>,
}

impl ReportSplit {
    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_rows_read".to_string(), self.cnt_rows_read);
        dict_counts.insert("cnt_rows_dropped".to_string(), self.cnt_rows_dropped);
        dict_counts.insert("cnt_groups".to_string(), self.cnt_groups);
        dict_counts.insert("cnt_files_written".to_string(), self.cnt_files_written);
        dict_counts.insert("cnt_groups_empty".to_string(), self.cnt_groups_empty);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} rows={} dropped={} groups={} files={} empty={} warnings={}",
            dict_counts["cnt_rows_read"],
            dict_counts["cnt_rows_dropped"],
            dict_counts["cnt_groups"],
            dict_counts["cnt_files_written"],
            dict_counts["cnt_groups_empty"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[SPLIT]"))
    }
}

/// Mutable accumulator for split statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportSplitBuilder {
    /// See [`ReportSplit::path_dir_out`].
    pub path_dir_out: PathBuf,
    /// See [`ReportSplit::path_file_log`].
    pub path_file_log: Option<PathBuf>,
    /// See [`ReportSplit::files`].
    pub files: Vec<String>,
    /// See [`ReportSplit::cnt_rows_read`].
    pub cnt_rows_read: u64,
    /// See [`ReportSplit::cnt_rows_dropped`].
    pub cnt_rows_dropped: u64,
    /// See [`ReportSplit::cnt_groups`].
    pub cnt_groups: u64,
    /// See [`ReportSplit::cnt_groups_empty`].
    pub cnt_groups_empty: u64,
    /// See [`ReportSplit::warnings`].
    pub warnings: Vec<String>,
}

impl ReportSplitBuilder {
    /// Record one written output file. A name seen before adds a warning,
    /// since the later file replaced the earlier one on disk.
    pub fn add_file(&mut self, file_name: String) {
        if self.files.contains(&file_name) {
            self.add_warning(format!(
                "Output file '{file_name}' written more than once; earlier content was overwritten."
            ));
        }
        self.files.push(file_name);
    }

    /// Increment empty-group count by one.
    pub fn add_group_empty(&mut self) {
        self.cnt_groups_empty += 1;
    }

    /// Add warning message; it is also emitted as a `warn!` event.
    pub fn add_warning(&mut self, warning: String) {
        warn!("{warning}");
        self.warnings.push(warning);
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportSplit {
        ReportSplit {
            path_dir_out: self.path_dir_out,
            path_file_log: self.path_file_log,
            cnt_files_written: self.files.len() as u64,
            files: self.files,
            cnt_rows_read: self.cnt_rows_read,
            cnt_rows_dropped: self.cnt_rows_dropped,
            cnt_groups: self.cnt_groups,
            cnt_groups_empty: self.cnt_groups_empty,
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ReportSplit, ReportSplitBuilder};

    #[test]
    fn report_split_to_dict_and_format() {
        let report = ReportSplit {
            cnt_rows_read: 5,
            cnt_rows_dropped: 1,
            cnt_groups: 2,
            cnt_files_written: 2,
            warnings: vec!["w".to_string()],
            ..ReportSplit::default()
        };

        let dict_counts = report.to_dict();
        assert_eq!(dict_counts["cnt_rows_read"], 5);
        assert_eq!(dict_counts["cnt_groups_empty"], 0);
        assert_eq!(dict_counts["cnt_warnings"], 1);

        let txt = report.format("[SPLIT]");
        assert_eq!(
            txt,
            "[SPLIT] rows=5 dropped=1 groups=2 files=2 empty=0 warnings=1"
        );
        assert_eq!(report.to_string(), txt);
    }

    #[test]
    fn report_builder_warns_on_repeated_file_name() {
        let mut builder = ReportSplitBuilder::default();
        builder.add_file("a_b.xlsx".to_string());
        builder.add_file("c.xlsx".to_string());
        builder.add_file("a_b.xlsx".to_string());

        let report = builder.build();
        assert_eq!(report.files, vec!["a_b.xlsx", "c.xlsx", "a_b.xlsx"]);
        assert_eq!(report.cnt_files_written, 3);
        assert_eq!(report.warning_count(), 1);
    }
}
