use std::io;

use thiserror::Error;

/// Errors originating from the sidebar store and its collaborators.
#[derive(Debug, Error)]
pub enum SidebarError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sidebar proxy used after its provider was dropped")]
    ProviderClosed,

    #[error("invalid sidebar seed: {message}")]
    InvalidSeed { message: String },
}

pub type Result<T> = std::result::Result<T, SidebarError>;
