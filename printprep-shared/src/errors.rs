use thiserror::Error;

/// Errors returned by profile store operations
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("no profile with id '{id}'")]
    NotFound { id: String },

    #[error("profile '{name}' is read-only")]
    ReadOnly { name: String },

    #[error("a profile with id '{id}' already exists")]
    DuplicateId { id: String },

    #[error("no profile is active")]
    NoActiveProfile,

    #[error("unknown setting key '{key}'")]
    UnknownSetting { key: String },

    #[error("invalid value '{value}' for setting '{key}'")]
    InvalidValue { key: String, value: String },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Errors from reading or writing profile and settings files
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("could not determine a user configuration directory")]
    NoConfigDir,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors from the output device layer
#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("no tracked device on port '{port}'")]
    UnknownDevice { port: String },

    #[error("port probe failed: {reason}")]
    ProbeFailed { reason: String },
}

/// Result type aliases for convenience
pub type ProfileResult<T> = Result<T, ProfileError>;
pub type StorageResult<T> = Result<T, StorageError>;
pub type PrepResult<T> = anyhow::Result<T>;
