use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or persisting a document.
///
/// Structural problems surface as `InvalidArgument` at the append call that
/// introduced them; `AlreadyExists` and `Io` only come out of
/// [`Document::write`](crate::Document::write).
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DocumentError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        DocumentError::InvalidArgument(message.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DocumentError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DocumentError>;
