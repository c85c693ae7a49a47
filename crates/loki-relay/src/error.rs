//! Process-level errors raised eagerly at startup or parse time.
//!
//! Delivery failures on the self-logging path are a separate concern and
//! live in [`crate::loki::TransportError`]; they are contained inside the
//! background task and never reach a logging caller.

/// Errors that can occur while configuring or running the relay.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Server error: {0}")]
    Server(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = RelayError::InvalidConfig("missing Loki URL".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid configuration: missing Loki URL"
        );
    }

    #[test]
    fn test_error_debug() {
        let error = RelayError::Server("bind failed".to_string());
        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("Server"));
    }
}
