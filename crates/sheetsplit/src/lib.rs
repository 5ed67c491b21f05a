//! `sheetsplit` v1:
//! split spreadsheet rows into one workbook per distinct pair of filter
//! column values (columns B and D by default).
//!
//! - `filter`   : shape validation and missing-value cleanup
//! - `group`    : first-seen partition by filter key
//! - `sanitize` : filesystem-safe names
//! - `progress` : per-group progress callbacks
//! - `run`      : run orchestration and state tracking
//! - `spec`     : options, states, models, errors
pub mod filter;
pub mod group;
pub mod progress;
pub mod run;
pub mod sanitize;
pub mod spec;

pub use filter::{clean_table, validate_shape};
pub use group::{derive_filter_name, plan_groups};
pub use progress::{
    LogProgressReporter, NoopProgressReporter, ProgressReporter, format_progress, percent_of,
};
pub use run::{SplitRunner, run_split};
pub use sanitize::{sanitize_cell, sanitize_file_name};
pub use spec::{
    C_FILE_EXTENSION_DEFAULT, C_FILTER_NAME_EMPTY_DEFAULT, EnumRunState, SpecFilterKey,
    SpecGroup, SpecSplitOptions, SpecTableCleaned, SplitError,
};
