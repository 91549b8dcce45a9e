use thiserror::Error;

/// Boxed error returned by caller-supplied transforms.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
/// Encode error
pub enum EncodeError {
    /// A transform failed; `source` is the error the transform produced.
    #[error("Transform for column `{column}` failed: {source}")]
    Transform {
        column: String,
        #[source]
        source: BoxError,
    },

    #[error("Not a record: {0}")]
    NotARecord(String),

    #[error("Serialization from: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Runtime from: {0}")]
    Runtime(#[from] std::io::Error),
}

impl EncodeError {
    /// Name of the column whose transform failed, if any.
    pub fn column(&self) -> Option<&str> {
        match self {
            EncodeError::Transform { column, .. } => Some(column),
            _ => None,
        }
    }

    /// Gives back the transform's own error, untouched.
    pub fn into_transform_error(self) -> Option<BoxError> {
        match self {
            EncodeError::Transform { source, .. } => Some(source),
            _ => None,
        }
    }
}
