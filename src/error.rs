use thiserror::Error;

/// Unified error type for the toolbelt library
#[derive(Error, Debug)]
pub enum ToolbeltError {
    // Codec errors
    #[error("JSON encoding failed: {0}")]
    Encode(String),

    #[error("JSON decoding failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Hashing failed: {0}")]
    Hash(String),

    // Proxy errors
    #[error("Invalid proxy address: {0}")]
    InvalidProxyAddress(String),

    // Validation errors
    #[error("Invalid chunk size: {0}")]
    InvalidChunkSize(usize),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Query execution errors
    #[error("Unknown or missing query state: {0}")]
    UnknownQueryState(String),

    // I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for toolbelt operations
pub type Result<T> = std::result::Result<T, ToolbeltError>;

impl ToolbeltError {
    /// Check if this error stems from malformed or unencodable data
    /// (as opposed to an I/O failure)
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            ToolbeltError::Encode(_)
                | ToolbeltError::Decode(_)
                | ToolbeltError::Hash(_)
                | ToolbeltError::UnknownQueryState(_)
        )
    }

    /// Check if this error was caused by invalid caller input
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            ToolbeltError::InvalidProxyAddress(_)
                | ToolbeltError::InvalidChunkSize(_)
                | ToolbeltError::InvalidArgument(_)
        )
    }
}
