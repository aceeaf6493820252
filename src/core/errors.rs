use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize)]
pub enum BackofficeError {
    /// An insert or count query against the backend failed
    #[error("Storage error: {0}")]
    StorageError(String),

    /// An outbound network call failed
    #[error("Network error: {0}")]
    NetworkError(String),

    /// A record could not be converted into a backend document
    #[error("Serialization error: {0}")]
    SerializationError(String),
}
