//! Gesture timing model and path math.
//!
//! Every pointer-driven channel follows the same timing so that a gesture
//! looks identical whichever channel ends up delivering it.

use crate::action::Point;

/// Time between pointer down and up for a click.
pub const CLICK_HOLD_MS: u64 = 100;

/// Pause between the two clicks of a double click.
pub const DOUBLE_CLICK_GAP_MS: u64 = 100;

/// Interval between drag move samples.
pub const DRAG_STEP_MS: u64 = 16;

/// Interval between slide move samples.
pub const SLIDE_STEP_MS: u64 = 20;

/// Pause after pointer down before a slide starts moving.
pub const SLIDE_SETTLE_MS: u64 = 50;

/// Lower bound on slide step count.
pub const SLIDE_MIN_STEPS: u32 = 10;

/// Number of drag steps for a duration, never less than one.
pub fn drag_steps(duration_ms: u64) -> u32 {
    let steps = duration_ms / DRAG_STEP_MS;
    steps.clamp(1, u32::MAX as u64) as u32
}

/// Effective slide step count.
pub fn slide_steps(requested: u32) -> u32 {
    requested.max(SLIDE_MIN_STEPS)
}

/// Exact linear interpolation at `i / steps`.
pub fn interpolate(from: Point, to: Point, i: u32, steps: u32) -> Point {
    if steps == 0 {
        return to;
    }
    let (i, steps) = (i as f32, steps as f32);
    Point::new(
        from.x + (to.x - from.x) * i / steps,
        from.y + (to.y - from.y) * i / steps,
    )
}

/// Intermediate move samples for `i` in `1..steps`.
///
/// The start and end points are not included; they are delivered by the
/// down and up events.
pub fn intermediate_samples(from: Point, to: Point, steps: u32) -> Vec<Point> {
    (1..steps).map(|i| interpolate(from, to, i, steps)).collect()
}
