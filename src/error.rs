use std::path::PathBuf;

/// Errors from reading and writing notes on disk.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid notes archive: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no notes saved for video {0}")]
    NoteNotFound(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
