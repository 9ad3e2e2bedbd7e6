//! Execution channel registration for AutoTap.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use autotap_channel_desktop::DesktopInputDevice;
use autotap_channel_rpc::{PrivilegedRpcChannel, RpcClient, StdioTransport};
use autotap_channel_shell::ShellInputDevice;
use autotap_config::{ChannelsConfig, RpcChannelConfig};
use autotap_core::{ChannelRegistry, PointerChannel};
use autotap_protocols::{ExecutionChannel, UiTreeProvider};

/// Registered channels plus the tree source, when one is configured.
pub(crate) struct Channels {
    pub registry: Arc<ChannelRegistry>,
    rpc: Option<Arc<PrivilegedRpcChannel>>,
}

impl Channels {
    /// The UI tree provider. Only the privileged helper can read the tree.
    pub fn provider(&self) -> Result<Arc<dyn UiTreeProvider>, Box<dyn std::error::Error>> {
        match &self.rpc {
            Some(rpc) => Ok(rpc.clone() as Arc<dyn UiTreeProvider>),
            None => Err("no UI tree provider: set channels.rpc.command and enable the rpc channel".into()),
        }
    }

    pub async fn shutdown(&self) {
        if let Some(rpc) = &self.rpc {
            if let Err(e) = rpc.client().close().await {
                warn!("Failed to close RPC helper: {}", e);
            }
        }
    }
}

/// Build every enabled channel. A channel that fails to start is skipped
/// with a warning so the others stay usable.
pub(crate) async fn register_channels(config: &ChannelsConfig) -> Channels {
    let registry = Arc::new(ChannelRegistry::new());

    let rpc = if config.rpc.enabled {
        spawn_rpc(&config.rpc).await
    } else {
        None
    };
    if let Some(rpc) = &rpc {
        register(&registry, rpc.clone());
    }

    if config.shell.enabled {
        let device = ShellInputDevice::new(
            config.shell.prefix.clone(),
            Duration::from_secs(config.shell.timeout_secs),
        );
        register(&registry, Arc::new(PointerChannel::new(device)));
    }

    if config.desktop.enabled {
        register(&registry, Arc::new(PointerChannel::new(DesktopInputDevice::new())));
    }

    info!("Registered channels: {:?}", registry.kinds());
    Channels { registry, rpc }
}

async fn spawn_rpc(config: &RpcChannelConfig) -> Option<Arc<PrivilegedRpcChannel>> {
    let Some(command) = &config.command else {
        info!("RPC channel has no command configured, skipping");
        return None;
    };

    match StdioTransport::spawn(command, &config.args).await {
        Ok(transport) => {
            let client = RpcClient::new(
                Arc::new(transport),
                Duration::from_secs(config.request_timeout_secs),
            );
            Some(Arc::new(PrivilegedRpcChannel::new(client)))
        }
        Err(e) => {
            warn!("Failed to start RPC helper {}: {}", command, e);
            None
        }
    }
}

fn register(registry: &ChannelRegistry, channel: Arc<dyn ExecutionChannel>) {
    let kind = channel.kind();
    match registry.register(channel) {
        Ok(()) => info!("Registered {} channel", kind),
        Err(e) => warn!("Failed to register {} channel: {}", kind, e),
    }
}
