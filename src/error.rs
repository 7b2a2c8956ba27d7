use thiserror::Error;

/// Generic error type
#[derive(Error, Debug)]
pub enum Error {
    /// Compact record could not be turned back into a domain value
    #[error("Decode error: {0}")]
    Decode(String),

    /// Domain value violates a structural constraint
    #[error("Validation error: {0}")]
    Validation(String),

    /// Platform credential API returned no credential
    #[error("Credential creation failed: {0}")]
    CredentialCreationFailed(String),

    /// Platform credential API returned no assertion
    #[error("Credential assertion failed: {0}")]
    CredentialAssertionFailed(String),

    /// Remote API answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base64 error
    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// URL parse error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Check if this error came from a malformed remote record
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode(_) | Error::Json(_) | Error::Base64(_))
    }

    /// HTTP status code if the error came from the remote API
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::HttpClient(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_classification() {
        let json_err = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        assert!(Error::from(json_err).is_decode());
        assert!(Error::Decode("bad".into()).is_decode());
        assert!(!Error::Validation("bad".into()).is_decode());
    }

    #[test]
    fn test_api_status_code() {
        let err = Error::Api { status: 404, message: "Not Found".into() };
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.to_string(), "API error (404): Not Found");
        assert_eq!(Error::Internal("x".into()).status_code(), None);
    }
}
