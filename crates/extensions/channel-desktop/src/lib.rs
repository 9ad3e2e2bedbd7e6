//! Gesture injection channel for AutoTap.
//!
//! Synthesizes pointer and keyboard events in-process with `enigo`. Screen
//! coordinates are used as-is, so the target window has to be mapped 1:1
//! onto the device's coordinate space (e.g. a mirrored or emulated screen).

mod device;
mod error;
mod keymap;

pub use device::DesktopInputDevice;
pub use error::InputError;
pub use keymap::key_for_code;
