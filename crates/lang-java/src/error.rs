use thiserror::Error;

#[derive(Error, Debug)]
pub enum JavaError {
    #[error("Failed to load Java grammar: {0}")]
    Language(String),
    #[error("Invalid query: {0}")]
    Query(String),
    #[error("Parsing error: {0}")]
    Parse(String),
    #[error("{0} is not a class")]
    NotAClass(String),
    #[error("Handler {handler} declares @RequestMapping without a usable HTTP method")]
    MissingRequestMethod { handler: String },
    #[error("Cannot resolve constant '{constant}' used by {owner}")]
    UnresolvedConstant { constant: String, owner: String },
    #[error("Invalid value for '{attribute}' on @{annotation}: {found}")]
    InvalidAnnotationValue {
        annotation: String,
        attribute: String,
        found: String,
    },
}

pub type Result<T> = std::result::Result<T, JavaError>;
