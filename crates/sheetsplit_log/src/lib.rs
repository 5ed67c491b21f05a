//! `sheetsplit_log` v1:
//! tracing subscriber bootstrap shared by the binaries.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

/// Default filter directive for a `-v` count; `if_quiet` keeps warnings only.
pub fn derive_filter_directive(verbosity: u8, if_quiet: bool) -> &'static str {
    if if_quiet {
        return "warn";
    }
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install a stderr `fmt` subscriber. `RUST_LOG` overrides the flags.
///
/// Calling it twice is harmless; the second install is ignored.
pub fn init_tracing(verbosity: u8, if_quiet: bool) {
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(derive_filter_directive(verbosity, if_quiet)));
    let _ = fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_by_verbosity() {
        assert_eq!(derive_filter_directive(0, false), "info");
        assert_eq!(derive_filter_directive(1, false), "debug");
        assert_eq!(derive_filter_directive(9, false), "trace");
        assert_eq!(derive_filter_directive(2, true), "warn");
    }

    #[test]
    fn test_init_tracing_twice_does_not_panic() {
        init_tracing(0, false);
        init_tracing(2, true);
    }
}
