//! Best-effort "open containing folder" in the host file browser.

use std::path::Path;

use tracing::{debug, warn};

use crate::spec::FolderOpenError;

/// Capability to show a directory to the user. Implementations never fail.
pub trait FolderOpener {
    /// Try to open `path`; failures are handled internally.
    fn open_folder(&self, path: &Path);
}

/// Opens folders through the desktop shell (`explorer`, `open`, `xdg-open`).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFolderOpener;

impl SystemFolderOpener {
    fn try_open(path: &Path) -> Result<(), FolderOpenError> {
        open::that_detached(path).map_err(|e| FolderOpenError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl FolderOpener for SystemFolderOpener {
    fn open_folder(&self, path: &Path) {
        match Self::try_open(path) {
            Ok(()) => debug!(path = %path.display(), "folder opened"),
            Err(err) => warn!("{err}"),
        }
    }
}

/// Does nothing; used when folder opening is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopFolderOpener;

impl FolderOpener for NoopFolderOpener {
    fn open_folder(&self, path: &Path) {
        debug!(path = %path.display(), "folder opening disabled");
    }
}
