//! Execution channel errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Channel unavailable: {0}")]
    Unavailable(String),

    #[error("Injection failed: {0}")]
    InjectionFailed(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Remote side rejected {method}")]
    Rejected { method: String },
}

impl ChannelError {
    /// Whether the failure happened before any input could reach the device.
    ///
    /// Everything else may have partially delivered input.
    pub fn is_clean(&self) -> bool {
        matches!(self, ChannelError::Unavailable(_) | ChannelError::InvalidInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_error() {
        let err = ChannelError::Unavailable("rpc helper not running".to_string());
        let display = err.to_string();
        assert!(display.contains("unavailable"));
        assert!(display.contains("rpc helper"));
    }

    #[test]
    fn test_injection_failed_error() {
        let err = ChannelError::InjectionFailed("exit code 1".to_string());
        assert!(err.to_string().contains("Injection failed"));
        assert!(err.to_string().contains("exit code 1"));
    }

    #[test]
    fn test_rejected_error() {
        let err = ChannelError::Rejected {
            method: "click".to_string(),
        };
        assert_eq!(err.to_string(), "Remote side rejected click");
    }

    #[test]
    fn test_is_clean() {
        assert!(ChannelError::Unavailable("x".to_string()).is_clean());
        assert!(ChannelError::InvalidInput("x".to_string()).is_clean());
        assert!(!ChannelError::InjectionFailed("x".to_string()).is_clean());
        assert!(!ChannelError::Transport("x".to_string()).is_clean());
        assert!(!ChannelError::Rejected { method: "drag".to_string() }.is_clean());
    }

    #[test]
    fn test_all_error_variants() {
        let errors: Vec<ChannelError> = vec![
            ChannelError::Unavailable("a".to_string()),
            ChannelError::InjectionFailed("b".to_string()),
            ChannelError::Transport("c".to_string()),
            ChannelError::Protocol("d".to_string()),
            ChannelError::InvalidInput("e".to_string()),
            ChannelError::Rejected { method: "f".to_string() },
        ];

        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }
}
