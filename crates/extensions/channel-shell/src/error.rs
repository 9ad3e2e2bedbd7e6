//! Shell channel errors.

use autotap_protocols::ChannelError;

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command timed out after {0}s")]
    Timeout(u64),

    #[error("Command failed with exit code {code}: {stderr}")]
    Failed { code: i32, stderr: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<ShellError> for ChannelError {
    fn from(err: ShellError) -> Self {
        match err {
            ShellError::Spawn { .. } => ChannelError::Unavailable(err.to_string()),
            ShellError::InvalidInput(msg) => ChannelError::InvalidInput(msg),
            ShellError::Timeout(_) | ShellError::Failed { .. } => {
                ChannelError::InjectionFailed(err.to_string())
            }
        }
    }
}
