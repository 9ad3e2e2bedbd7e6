//! Core errors.

use autotap_protocols::ChannelKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Channel already registered: {0}")]
    AlreadyRegistered(ChannelKind),

    #[error("Channel not found: {0}")]
    NotFound(ChannelKind),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::AlreadyRegistered(ChannelKind::PrivilegedRpc);
        assert_eq!(err.to_string(), "Channel already registered: privileged_rpc");

        let err = RegistryError::NotFound(ChannelKind::GestureInjector);
        assert!(err.to_string().contains("gesture_injector"));
    }
}
