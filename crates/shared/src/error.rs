use thiserror::Error;

/// Ways a `/predict` body can fail to match the expected shape.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("response body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("response body must be a JSON object")]
    NotAnObject,
    #[error("section key {key:?} is not a numeric index")]
    NonNumericKey { key: String },
    #[error("section {key} must be a [label, value] pair")]
    MalformedSection { key: String },
}
