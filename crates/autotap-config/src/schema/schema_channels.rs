//! Execution channel configuration.

use std::collections::HashMap;

use autotap_protocols::{ActionKind, ChannelKind};
use serde::{Deserialize, Serialize};

use super::default_true;

/// Channel priority and per-channel settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelsConfig {
    /// Per-action channel order. Kinds not listed use
    /// [`ChannelKind::ALL`], most privileged first.
    #[serde(default)]
    pub priority: HashMap<ActionKind, Vec<ChannelKind>>,

    #[serde(default)]
    pub rpc: RpcChannelConfig,

    #[serde(default)]
    pub shell: ShellChannelConfig,

    #[serde(default)]
    pub desktop: DesktopChannelConfig,
}

impl ChannelsConfig {
    /// Effective channel order for an action kind.
    pub fn priority_for(&self, kind: ActionKind) -> Vec<ChannelKind> {
        self.priority
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| ChannelKind::ALL.to_vec())
    }

    pub fn is_enabled(&self, kind: ChannelKind) -> bool {
        match kind {
            ChannelKind::PrivilegedRpc => self.rpc.enabled,
            ChannelKind::SyntheticInputInjector => self.shell.enabled,
            ChannelKind::GestureInjector => self.desktop.enabled,
        }
    }
}

/// Privileged helper reached over line-delimited JSON-RPC on stdio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcChannelConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Helper executable. The channel is not registered when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for RpcChannelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: None,
            args: Vec::new(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_request_timeout_secs() -> u64 {
    10
}

/// Platform `input` command run through a shell prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellChannelConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Program and leading arguments, e.g. `["adb", "shell"]`.
    #[serde(default = "default_shell_prefix")]
    pub prefix: Vec<String>,

    #[serde(default = "default_shell_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ShellChannelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prefix: default_shell_prefix(),
            timeout_secs: default_shell_timeout_secs(),
        }
    }
}

fn default_shell_prefix() -> Vec<String> {
    vec!["adb".to_string(), "shell".to_string()]
}

fn default_shell_timeout_secs() -> u64 {
    5
}

/// In-process pointer injection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesktopChannelConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for DesktopChannelConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
