use thiserror::Error;

/// Type alias for Result with TrackerError
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Error types for the mail tracking pipeline
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Gmail API returned an error
    #[error("Gmail API error: {0}")]
    ApiError(String),

    /// Authentication failed (missing/malformed secret file, token exchange)
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// Network-related error (connection issues, timeouts, etc.)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Server returned 5xx error
    #[error("Server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden (403)
    #[error("Access forbidden: {0}")]
    Forbidden(String),

    /// Thread payload did not have the expected shape
    #[error("Invalid thread format: {0}")]
    InvalidThreadFormat(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV writer error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl From<google_gmail1::Error> for TrackerError {
    fn from(error: google_gmail1::Error) -> Self {
        match error {
            google_gmail1::Error::Failure(ref response) => {
                let status = response.status();
                let status_code = status.as_u16();
                let message = format!(
                    "HTTP {}: {}",
                    status_code,
                    status.canonical_reason().unwrap_or("Unknown")
                );

                match status_code {
                    401 => TrackerError::AuthError(message),
                    404 => TrackerError::NotFound(message),
                    400 => TrackerError::BadRequest(message),
                    403 => TrackerError::Forbidden(message),
                    500..=599 => TrackerError::ServerError {
                        status: status_code,
                        message,
                    },
                    _ => TrackerError::ApiError(message),
                }
            }
            google_gmail1::Error::BadRequest(ref err) => TrackerError::BadRequest(format!("{}", err)),
            google_gmail1::Error::HttpError(ref err) => {
                TrackerError::NetworkError(format!("Connection error: {}", err))
            }
            google_gmail1::Error::Io(err) => TrackerError::NetworkError(err.to_string()),
            google_gmail1::Error::MissingToken(ref err) => {
                TrackerError::AuthError(format!("Missing token: {}", err))
            }
            _ => TrackerError::ApiError(error.to_string()),
        }
    }
}
