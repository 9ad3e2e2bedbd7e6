//! Synthetic input channel for AutoTap.
//!
//! Drives the platform `input` command through a configurable prefix such
//! as `adb shell`, one process per pointer primitive.

mod command;
mod device;
mod error;

pub use command::{InputCommand, MotionAction};
pub use device::ShellInputDevice;
pub use error::ShellError;
