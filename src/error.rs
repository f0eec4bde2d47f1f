use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DirectoryError {
    /// Missing or malformed input on a register/login/add call.
    pub fn validation(msg: impl Into<String>) -> Self {
        DirectoryError::Validation(msg.into())
    }

    /// Uniqueness violation on username, email, or wallet address.
    pub fn conflict(msg: impl Into<String>) -> Self {
        DirectoryError::Conflict(msg.into())
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        DirectoryError::Auth(msg.into())
    }
}

impl From<serde_json::Error> for DirectoryError {
    fn from(err: serde_json::Error) -> Self {
        DirectoryError::Serialization(err.to_string())
    }
}

impl From<sled::Error> for DirectoryError {
    fn from(err: sled::Error) -> Self {
        DirectoryError::Database(err.to_string())
    }
}
