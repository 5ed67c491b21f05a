//! Run orchestration: load -> clean -> group -> write files -> write log -> open folder.

use std::path::Path;

use sheetsplit_io_fs::{
    FolderOpener, ReportSplit, ReportSplitBuilder, derive_output_dir, derive_output_file_name,
    derive_output_file_path, ensure_output_dir, write_run_log,
};
use sheetsplit_io_xlsx::{read_table, write_table_rows};
use tracing::{debug, info};

use crate::filter::clean_table;
use crate::group::plan_groups;
use crate::progress::ProgressReporter;
use crate::spec::{EnumRunState, SpecSplitOptions, SplitError};

/// Drives one split run and tracks its [`EnumRunState`].
///
/// Each call to [`Self::run`] starts from `Idle` and ends in `Done` or
/// `Failed`; the runner can be reused for another input.
pub struct SplitRunner<'a> {
    options: SpecSplitOptions,
    progress: &'a mut dyn ProgressReporter,
    opener: &'a dyn FolderOpener,
    state: EnumRunState,
}

impl<'a> SplitRunner<'a> {
    /// Bind options and the two external collaborators.
    pub fn new(
        options: SpecSplitOptions,
        progress: &'a mut dyn ProgressReporter,
        opener: &'a dyn FolderOpener,
    ) -> Self {
        Self {
            options,
            progress,
            opener,
            state: EnumRunState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> EnumRunState {
        self.state
    }

    /// Split `path_file_in` into one workbook per filter key.
    ///
    /// Any error moves the runner to `Failed`; files written before the
    /// failure stay on disk. Folder opening never fails the run.
    pub fn run(&mut self, path_file_in: &Path) -> Result<ReportSplit, SplitError> {
        self.state = EnumRunState::Idle;
        match self.run_inner(path_file_in) {
            Ok(report) => {
                self.transition(EnumRunState::Done);
                info!("{report}");
                Ok(report)
            }
            Err(err) => {
                self.transition(EnumRunState::Failed);
                Err(err)
            }
        }
    }

    fn run_inner(&mut self, path_file_in: &Path) -> Result<ReportSplit, SplitError> {
        let mut builder = ReportSplitBuilder::default();

        self.transition(EnumRunState::Loading);
        let table = read_table(path_file_in, &self.options.read_options)?;
        builder.cnt_rows_read = table.height() as u64;
        info!(
            path = %path_file_in.display(),
            n_rows = table.height(),
            n_cols = table.width(),
            "input loaded"
        );

        self.transition(EnumRunState::Validating);
        let cleaned = clean_table(table, &self.options)?;
        builder.cnt_rows_dropped = cleaned.n_rows_dropped as u64;
        let table = cleaned.table;

        self.transition(EnumRunState::Grouping);
        let l_groups = plan_groups(&table, &self.options);
        let n_total = l_groups.len();
        builder.cnt_groups = n_total as u64;
        info!(n_groups = n_total, "filter combinations found");

        self.transition(EnumRunState::WritingFiles);
        let path_dir_out = derive_output_dir(path_file_in, &self.options.dir_prefix)?;
        ensure_output_dir(&path_dir_out)?;
        builder.path_dir_out = path_dir_out.clone();

        for (n_idx_group, group) in l_groups.iter().enumerate() {
            if group.is_empty() {
                builder.add_group_empty();
            } else {
                let c_file_name =
                    derive_output_file_name(&group.filter_name, &self.options.file_extension);
                let path_file_out = derive_output_file_path(
                    &path_dir_out,
                    &group.filter_name,
                    &self.options.file_extension,
                );
                let report_xlsx = write_table_rows(
                    &path_file_out,
                    &table,
                    &group.l_idx_rows,
                    &self.options.write_options,
                )?;
                debug!(
                    file = %c_file_name,
                    n_rows = report_xlsx.cnt_rows_written,
                    "group written"
                );
                builder.add_file(c_file_name);
            }
            self.progress
                .on_progress(n_idx_group + 1, n_total, &group.filter_name);
        }

        self.transition(EnumRunState::LoggingResults);
        let path_file_log =
            write_run_log(&path_dir_out, &self.options.log_file_name, &builder.files)?;
        builder.path_file_log = Some(path_file_log);

        self.transition(EnumRunState::OpeningFolder);
        if self.options.if_open_folder {
            self.opener.open_folder(&path_dir_out);
        }

        Ok(builder.build())
    }

    fn transition(&mut self, state_next: EnumRunState) {
        debug!(from = %self.state, to = %state_next, "run state");
        self.state = state_next;
    }
}

/// Run a split with fresh collaborators; see [`SplitRunner::run`].
pub fn run_split(
    path_file_in: &Path,
    options: SpecSplitOptions,
    progress: &mut dyn ProgressReporter,
    opener: &dyn FolderOpener,
) -> Result<ReportSplit, SplitError> {
    SplitRunner::new(options, progress, opener).run(path_file_in)
}
