use thiserror::Error;

/// Failures coming out of a `SheetStore`.
///
/// None of these are recovered inside the service; callers see them as-is.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("missing credentials: {0}")]
    MissingCredentials(&'static str),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("decode error: {0}")]
    Decode(String),
    #[error("worksheet `{0}` has no header row")]
    MissingHeader(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ServiceError::Decode(e.to_string())
        } else {
            ServiceError::Network(e.to_string())
        }
    }
}

impl ServiceError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::MissingCredentials(_) => "missing_credentials",
            ServiceError::Auth(_) => "auth",
            ServiceError::Network(_) => "network",
            ServiceError::Upstream { .. } => "upstream",
            ServiceError::Decode(_) => "decode",
            ServiceError::MissingHeader(_) => "missing_header",
        }
    }
}
