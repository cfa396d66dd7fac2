use thiserror::Error;

/// Error type covering every fallible registry operation
#[derive(Error, Debug)]
pub enum Error {
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Import failed: {0}")]
    Import(String),

    #[error("Execution error: {0}")]
    Execution(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a command not found error
    pub fn command_not_found<S: Into<String>>(id: S) -> Self {
        Self::CommandNotFound(id.into())
    }

    /// Create a directory not found error
    pub fn directory_not_found<S: Into<String>>(id: S) -> Self {
        Self::DirectoryNotFound(id.into())
    }

    /// Create an import error
    pub fn import<S: Into<String>>(msg: S) -> Self {
        Self::Import(msg.into())
    }

    /// Create an execution error
    pub fn execution<S: Into<String>>(msg: S) -> Self {
        Self::Execution(msg.into())
    }

    /// Create a storage error
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Self::Storage(msg.into())
    }

    /// Whether this error means a referenced entity is missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CommandNotFound(_) | Self::DirectoryNotFound(_))
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::CommandNotFound(id) => {
                format!(
                    "Command '{}' no longer exists. It may have been deleted from another view.",
                    id
                )
            }
            Self::DirectoryNotFound(id) => {
                format!(
                    "Directory '{}' no longer exists. It may have been deleted from another view.",
                    id
                )
            }
            Self::Import(reason) => {
                format!(
                    "Import failed: {}. Check that the file is an unmodified export.",
                    reason
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Convenient result type for registry operations
pub type Result<T> = std::result::Result<T, Error>;
