//! UI tree source.

use async_trait::async_trait;

use crate::types::UiNode;

/// Supplies snapshots of the foreground window.
///
/// Every call fetches fresh state; implementations must not cache trees
/// between calls. `None` means the information is currently unavailable.
#[async_trait]
pub trait UiTreeProvider: Send + Sync {
    async fn foreground_tree(&self) -> Option<UiNode>;

    async fn foreground_package(&self) -> Option<String>;

    /// Activity or window signature of the foreground screen.
    async fn foreground_activity(&self) -> Option<String>;
}
