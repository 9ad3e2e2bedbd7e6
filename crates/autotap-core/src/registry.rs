//! Registry of execution channels keyed by privilege level.

use std::sync::Arc;

use autotap_protocols::{ChannelKind, ExecutionChannel};
use dashmap::DashMap;

use crate::error::RegistryError;

/// Thread-safe channel storage. At most one channel per [`ChannelKind`].
pub struct ChannelRegistry {
    channels: DashMap<ChannelKind, Arc<dyn ExecutionChannel>>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Register a channel under its own kind.
    ///
    /// # Errors
    ///
    /// Returns an error if a channel of the same kind is already registered.
    pub fn register(&self, channel: Arc<dyn ExecutionChannel>) -> Result<(), RegistryError> {
        let kind = channel.kind();
        if self.channels.contains_key(&kind) {
            return Err(RegistryError::AlreadyRegistered(kind));
        }
        self.channels.insert(kind, channel);
        Ok(())
    }

    pub fn unregister(&self, kind: ChannelKind) -> Result<(), RegistryError> {
        self.channels
            .remove(&kind)
            .ok_or(RegistryError::NotFound(kind))?;
        Ok(())
    }

    pub fn get(&self, kind: ChannelKind) -> Option<Arc<dyn ExecutionChannel>> {
        self.channels.get(&kind).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, kind: ChannelKind) -> bool {
        self.channels.contains_key(&kind)
    }

    /// Registered kinds, most privileged first.
    pub fn kinds(&self) -> Vec<ChannelKind> {
        ChannelKind::ALL
            .into_iter()
            .filter(|kind| self.channels.contains_key(kind))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use autotap_protocols::{ChannelError, Point};

    struct NullChannel(ChannelKind);

    #[async_trait]
    impl ExecutionChannel for NullChannel {
        fn kind(&self) -> ChannelKind {
            self.0
        }
        async fn is_available(&self) -> bool {
            true
        }
        async fn click(&self, _at: Point) -> Result<(), ChannelError> {
            Ok(())
        }
        async fn long_click(&self, _at: Point, _duration_ms: u64) -> Result<(), ChannelError> {
            Ok(())
        }
        async fn double_click(&self, _at: Point) -> Result<(), ChannelError> {
            Ok(())
        }
        async fn drag(&self, _from: Point, _to: Point, _duration_ms: u64) -> Result<(), ChannelError> {
            Ok(())
        }
        async fn slide(&self, _from: Point, _to: Point, _steps: u32) -> Result<(), ChannelError> {
            Ok(())
        }
        async fn type_text(&self, _text: &str) -> Result<(), ChannelError> {
            Ok(())
        }
        async fn send_key(&self, _key_code: i32) -> Result<(), ChannelError> {
            Ok(())
        }
    }

    #[test]
    fn test_registry_new() {
        let registry = ChannelRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_register_and_get() {
        let registry = ChannelRegistry::default();
        registry
            .register(Arc::new(NullChannel(ChannelKind::GestureInjector)))
            .unwrap();

        assert!(registry.contains(ChannelKind::GestureInjector));
        assert!(registry.get(ChannelKind::PrivilegedRpc).is_none());
        assert_eq!(
            registry.get(ChannelKind::GestureInjector).unwrap().kind(),
            ChannelKind::GestureInjector
        );
    }

    #[test]
    fn test_register_duplicate_kind() {
        let registry = ChannelRegistry::new();
        registry
            .register(Arc::new(NullChannel(ChannelKind::PrivilegedRpc)))
            .unwrap();
        let result = registry.register(Arc::new(NullChannel(ChannelKind::PrivilegedRpc)));
        assert!(matches!(result, Err(RegistryError::AlreadyRegistered(_))));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregister() {
        let registry = ChannelRegistry::new();
        registry
            .register(Arc::new(NullChannel(ChannelKind::SyntheticInputInjector)))
            .unwrap();
        registry.unregister(ChannelKind::SyntheticInputInjector).unwrap();
        assert!(registry.is_empty());
        assert!(registry.unregister(ChannelKind::SyntheticInputInjector).is_err());
    }

    #[test]
    fn test_kinds_ordered_by_privilege() {
        let registry = ChannelRegistry::new();
        registry
            .register(Arc::new(NullChannel(ChannelKind::GestureInjector)))
            .unwrap();
        registry
            .register(Arc::new(NullChannel(ChannelKind::PrivilegedRpc)))
            .unwrap();
        assert_eq!(
            registry.kinds(),
            vec![ChannelKind::PrivilegedRpc, ChannelKind::GestureInjector]
        );
    }
}
