use std::io;
use std::path::PathBuf;

use docnav_sidebar::SidebarError;
use thiserror::Error;

/// Errors that abort a replay run.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Sidebar(#[from] SidebarError),

    #[error("failed to read script {path}: {source}")]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid script {path}: {source}")]
    ScriptParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode report: {0}")]
    Report(#[source] serde_json::Error),

    #[error("failed to write report: {0}")]
    Output(#[source] io::Error),
}
