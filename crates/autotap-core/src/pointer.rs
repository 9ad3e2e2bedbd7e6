//! Gesture timing on top of raw pointer primitives.

use std::time::Duration;

use async_trait::async_trait;
use autotap_protocols::gesture::{
    self, CLICK_HOLD_MS, DOUBLE_CLICK_GAP_MS, DRAG_STEP_MS, SLIDE_SETTLE_MS, SLIDE_STEP_MS,
};
use autotap_protocols::{ChannelError, ChannelKind, ExecutionChannel, Point, PointerDevice};
use tokio::time::sleep;
use tracing::{debug, warn};

/// Adapts a [`PointerDevice`] into a full [`ExecutionChannel`] using the
/// shared gesture timing model.
///
/// Once a down has been delivered, every failure path releases the pointer
/// before returning, so the next channel never starts on a held press.
pub struct PointerChannel<D> {
    device: D,
}

impl<D: PointerDevice> PointerChannel<D> {
    pub fn new(device: D) -> Self {
        Self { device }
    }

    /// Best-effort release at `at`, then hand back the original error.
    async fn release_after(&self, at: Point, err: ChannelError) -> ChannelError {
        if let Err(up_err) = self.device.pointer_up(at).await {
            warn!(
                "{} pointer may still be pressed at {}: {}",
                self.device.kind(),
                at,
                up_err
            );
        }
        err
    }

    /// Release a pressed pointer at `at`.
    async fn finish(&self, at: Point) -> Result<(), ChannelError> {
        match self.device.pointer_up(at).await {
            Ok(()) => Ok(()),
            Err(err) => Err(self.release_after(at, err).await),
        }
    }

    async fn press(&self, at: Point, hold: Duration) -> Result<(), ChannelError> {
        self.device.pointer_down(at).await?;
        sleep(hold).await;
        self.finish(at).await
    }

    /// Move through the intermediate samples, then release at `to`.
    async fn stroke(
        &self,
        from: Point,
        to: Point,
        steps: u32,
        interval: Duration,
    ) -> Result<(), ChannelError> {
        let mut last = from;
        for sample in gesture::intermediate_samples(from, to, steps) {
            if let Err(err) = self.device.pointer_move(sample).await {
                return Err(self.release_after(last, err).await);
            }
            last = sample;
            sleep(interval).await;
        }
        self.finish(to).await
    }
}

#[async_trait]
impl<D: PointerDevice> ExecutionChannel for PointerChannel<D> {
    fn kind(&self) -> ChannelKind {
        self.device.kind()
    }

    async fn is_available(&self) -> bool {
        self.device.is_available().await
    }

    async fn click(&self, at: Point) -> Result<(), ChannelError> {
        debug!("{} click at {}", self.device.kind(), at);
        self.press(at, Duration::from_millis(CLICK_HOLD_MS)).await
    }

    async fn long_click(&self, at: Point, duration_ms: u64) -> Result<(), ChannelError> {
        debug!("{} long click at {} for {}ms", self.device.kind(), at, duration_ms);
        self.press(at, Duration::from_millis(duration_ms)).await
    }

    async fn double_click(&self, at: Point) -> Result<(), ChannelError> {
        self.click(at).await?;
        sleep(Duration::from_millis(DOUBLE_CLICK_GAP_MS)).await;
        self.click(at).await
    }

    async fn drag(&self, from: Point, to: Point, duration_ms: u64) -> Result<(), ChannelError> {
        let steps = gesture::drag_steps(duration_ms);
        debug!(
            "{} drag {} -> {} in {} steps",
            self.device.kind(),
            from,
            to,
            steps
        );
        self.device.pointer_down(from).await?;
        self.stroke(from, to, steps, Duration::from_millis(DRAG_STEP_MS))
            .await
    }

    async fn slide(&self, from: Point, to: Point, steps: u32) -> Result<(), ChannelError> {
        let steps = gesture::slide_steps(steps);
        debug!(
            "{} slide {} -> {} in {} steps",
            self.device.kind(),
            from,
            to,
            steps
        );
        self.device.pointer_down(from).await?;
        sleep(Duration::from_millis(SLIDE_SETTLE_MS)).await;
        self.stroke(from, to, steps, Duration::from_millis(SLIDE_STEP_MS))
            .await
    }

    async fn type_text(&self, text: &str) -> Result<(), ChannelError> {
        self.device.type_text(text).await
    }

    async fn send_key(&self, key_code: i32) -> Result<(), ChannelError> {
        self.device.send_key(key_code).await
    }
}
