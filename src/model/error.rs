/// Errors that can occur reading a per-source JSON document
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// I/O error while reading the document
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Document is not valid JSON or does not match the document layout
    #[error("JSON serialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    /// A field required by the document's `meta.type` is absent
    #[error("{kind} document is missing `{field}`")]
    MissingField {
        /// Declared document type
        kind: &'static str,
        /// Name of the absent field
        field: &'static str,
    },

    /// `meta.count` disagrees with the payload
    #[error("meta.count is {declared} but the document holds {actual}")]
    CountMismatch {
        /// Count stated in `meta`
        declared: usize,
        /// Count derived from `items` or `data`
        actual: usize,
    },

    /// Neither `meta.type` nor `meta.error` is present
    #[error("document for {0} has neither a type nor an error marker")]
    UnknownShape(String),
}
