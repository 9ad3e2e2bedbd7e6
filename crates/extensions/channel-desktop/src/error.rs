//! Input injection errors.

use autotap_protocols::ChannelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Input backend unavailable: {0}")]
    Connect(String),

    #[error("Input failed: {0}")]
    Failed(String),

    #[error("Unsupported key code: {0}")]
    UnsupportedKey(i32),

    #[error("Input task aborted: {0}")]
    Task(String),
}

impl From<InputError> for ChannelError {
    fn from(err: InputError) -> Self {
        match err {
            InputError::Connect(msg) => ChannelError::Unavailable(msg),
            InputError::UnsupportedKey(code) => {
                ChannelError::InvalidInput(format!("unsupported key code {}", code))
            }
            InputError::Failed(_) | InputError::Task(_) => {
                ChannelError::InjectionFailed(err.to_string())
            }
        }
    }
}
