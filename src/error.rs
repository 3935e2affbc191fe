use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid request input: {0}")]
    InvalidInput(#[from] InputError),
    #[error("parameter could not be serialized to JSON: {0}")]
    Encoding(#[source] serde_json::Error),
    #[error("request failed: {0}")]
    Transport(#[source] BoxError),
    #[error("response body is not valid JSON: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        /// The raw body, kept for diagnostics.
        body: String,
    },
}

/// Input defects detected before any network call. Never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("unrecognized HTTP method: {0}")]
    UnknownMethod(String),
    #[error("not a well-formed absolute URL: {0}")]
    MalformedUrl(String),
    #[error("credential field {0} is empty")]
    EmptyCredential(&'static str),
}
