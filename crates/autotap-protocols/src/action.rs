//! Dispatchable input requests.
//!
//! An [`Action`] is the concrete, parameterized form of one input gesture.
//! Its [`ActionKind`] selects the channel priority list used to deliver it.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;

/// Screen coordinate in device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Privilege level of an execution channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// Out-of-process helper with elevated rights, reached over RPC.
    PrivilegedRpc,
    /// Platform `input` command run through a shell.
    SyntheticInputInjector,
    /// In-process pointer and keyboard injection.
    GestureInjector,
}

impl ChannelKind {
    /// Every kind, most privileged first.
    pub const ALL: [ChannelKind; 3] = [
        ChannelKind::PrivilegedRpc,
        ChannelKind::SyntheticInputInjector,
        ChannelKind::GestureInjector,
    ];
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelKind::PrivilegedRpc => write!(f, "privileged_rpc"),
            ChannelKind::SyntheticInputInjector => write!(f, "synthetic_input_injector"),
            ChannelKind::GestureInjector => write!(f, "gesture_injector"),
        }
    }
}

/// Discriminant of [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Click,
    LongClick,
    DoubleClick,
    Drag,
    Slide,
    TypeText,
    SendKey,
}

impl ActionKind {
    pub const ALL: [ActionKind; 7] = [
        ActionKind::Click,
        ActionKind::LongClick,
        ActionKind::DoubleClick,
        ActionKind::Drag,
        ActionKind::Slide,
        ActionKind::TypeText,
        ActionKind::SendKey,
    ];
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Click => write!(f, "click"),
            ActionKind::LongClick => write!(f, "long_click"),
            ActionKind::DoubleClick => write!(f, "double_click"),
            ActionKind::Drag => write!(f, "drag"),
            ActionKind::Slide => write!(f, "slide"),
            ActionKind::TypeText => write!(f, "type_text"),
            ActionKind::SendKey => write!(f, "send_key"),
        }
    }
}

/// One input request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Click {
        at: Point,
    },
    LongClick {
        at: Point,
        duration_ms: u64,
    },
    DoubleClick {
        at: Point,
    },
    Drag {
        from: Point,
        to: Point,
        duration_ms: u64,
    },
    Slide {
        from: Point,
        to: Point,
        steps: u32,
    },
    TypeText {
        text: String,
    },
    SendKey {
        key_code: i32,
    },
}

impl Action {
    pub fn click(x: f32, y: f32) -> Self {
        Action::Click {
            at: Point::new(x, y),
        }
    }

    pub fn long_click(x: f32, y: f32, duration_ms: u64) -> Self {
        Action::LongClick {
            at: Point::new(x, y),
            duration_ms,
        }
    }

    pub fn double_click(x: f32, y: f32) -> Self {
        Action::DoubleClick {
            at: Point::new(x, y),
        }
    }

    pub fn drag(from: Point, to: Point, duration_ms: u64) -> Self {
        Action::Drag {
            from,
            to,
            duration_ms,
        }
    }

    pub fn slide(from: Point, to: Point, steps: u32) -> Self {
        Action::Slide { from, to, steps }
    }

    pub fn type_text(text: impl Into<String>) -> Self {
        Action::TypeText { text: text.into() }
    }

    pub fn send_key(key_code: i32) -> Self {
        Action::SendKey { key_code }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Click { .. } => ActionKind::Click,
            Action::LongClick { .. } => ActionKind::LongClick,
            Action::DoubleClick { .. } => ActionKind::DoubleClick,
            Action::Drag { .. } => ActionKind::Drag,
            Action::Slide { .. } => ActionKind::Slide,
            Action::TypeText { .. } => ActionKind::TypeText,
            Action::SendKey { .. } => ActionKind::SendKey,
        }
    }
}
