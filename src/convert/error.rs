use std::path::PathBuf;

/// Errors that can occur during a conversion run
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// I/O error reading a source table or writing an output document
    #[error("I/O error on {}: {source}", .path.display())]
    IoError {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Error serializing an output document
    #[error("JSON serialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    /// Error serializing a per-source document
    #[error("Document error: {0}")]
    DocumentError(#[from] crate::model::DocumentError),
}

impl ConversionError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| ConversionError::IoError { path, source }
    }
}
