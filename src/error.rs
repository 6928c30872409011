use thiserror::Error;

/// Failure of a single backend request, already normalized.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request never produced a response (connect, timeout, body read).
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx status, or a 2xx body carrying an explicit `error` field.
    #[error("{message}")]
    Server { status: Option<u16>, message: String },

    /// The body did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    pub fn server(status: Option<u16>, message: impl Into<String>) -> Self {
        FetchError::Server {
            status,
            message: message.into(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Malformed(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed(err.to_string())
    }
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;
