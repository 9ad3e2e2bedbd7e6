//! Slider captcha gesture planning.
//!
//! The handle is dragged from its center to the right end of the track,
//! stopping half a handle short so it lands inside the track. Vertical
//! positions and the duration are randomized so consecutive attempts never
//! replay the exact same gesture. Vertical jitter never exceeds half the
//! handle height.

use autotap_config::CaptchaConfig;
use autotap_protocols::{Bounds, Point};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A concrete drag to perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlidePlan {
    pub from: Point,
    pub to: Point,
    pub duration_ms: u64,
}

pub struct SlidePlanner {
    rng: Mutex<StdRng>,
    jitter_px: u32,
    min_ms: u64,
    max_ms: u64,
}

impl SlidePlanner {
    pub fn new(config: &CaptchaConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic planner for reproducible runs.
    pub fn with_seed(config: &CaptchaConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &CaptchaConfig, rng: StdRng) -> Self {
        let (min_ms, max_ms) = if config.min_slide_ms <= config.max_slide_ms {
            (config.min_slide_ms, config.max_slide_ms)
        } else {
            (config.max_slide_ms, config.min_slide_ms)
        };
        Self {
            rng: Mutex::new(rng),
            jitter_px: config.jitter_px,
            min_ms,
            max_ms,
        }
    }

    pub fn plan(&self, track: &Bounds, handle: &Bounds) -> SlidePlan {
        let start = handle.center();
        let end_x = track.right as f32 - handle.width() as f32 / 2.0;

        // Both endpoints stay on the handle's rows however large the config.
        let jitter = i32::try_from(self.jitter_px)
            .unwrap_or(i32::MAX)
            .min(handle.height() / 2)
            .max(0);

        let mut rng = self.rng.lock();
        let from_dy = rng.gen_range(-jitter..=jitter) as f32;
        let to_dy = rng.gen_range(-jitter..=jitter) as f32;
        let duration_ms = rng.gen_range(self.min_ms..=self.max_ms);

        SlidePlan {
            from: Point::new(start.x, start.y + from_dy),
            to: Point::new(end_x, start.y + to_dy),
            duration_ms,
        }
    }
}
