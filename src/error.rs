use thiserror::Error;

/// Failure of a single admin API call
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (connection refused, DNS, ...)
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status. `message` is the response body,
    /// or the operation's fallback text when the body was empty.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// A 2xx response whose body could not be decoded
    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

impl ApiError {
    /// "Failed to <action>: <message>", unless the message already says so
    pub fn failure_message(&self, action: &str) -> String {
        let message = self.to_string();
        if message.starts_with("Failed to ") {
            message
        } else {
            format!("Failed to {action}: {message}")
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_displays_message_only() {
        let err = ApiError::Server {
            status: 500,
            message: "Failed to fetch stubs".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to fetch stubs");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_failure_message_prefixes_once() {
        let fallback = ApiError::Server {
            status: 500,
            message: "Failed to update stub".to_string(),
        };
        assert_eq!(fallback.failure_message("save stub"), "Failed to update stub");

        let body = ApiError::Server {
            status: 400,
            message: "bad regex".to_string(),
        };
        assert_eq!(body.failure_message("save stub"), "Failed to save stub: bad regex");
    }

    #[test]
    fn test_decode_error_has_no_status() {
        let err = ApiError::Decode("expected value".to_string());
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("expected value"));
    }
}
