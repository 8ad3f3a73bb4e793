#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Unknown HTTP method: {0}")]
    UnknownHttpMethod(String),
}
