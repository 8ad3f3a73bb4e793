use clientspec_java::JavaError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientSpecError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Java analysis error: {0}")]
    Java(#[from] JavaError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, ClientSpecError>;
