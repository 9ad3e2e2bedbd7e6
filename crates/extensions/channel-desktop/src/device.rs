//! Pointer device backed by `enigo`.

use async_trait::async_trait;
use autotap_protocols::{ChannelError, ChannelKind, Point, PointerDevice};
use enigo::{Button, Coordinate, Direction, Enigo, Keyboard, Mouse, Settings};
use tracing::debug;

use crate::error::InputError;
use crate::keymap::key_for_code;

/// Left-button pointer plus keyboard on the local display.
///
/// Every primitive opens its own `enigo` connection on the blocking pool,
/// so the device itself holds no platform handle.
#[derive(Debug, Default)]
pub struct DesktopInputDevice;

impl DesktopInputDevice {
    pub fn new() -> Self {
        Self
    }

    async fn with_enigo<F>(&self, op: F) -> Result<(), InputError>
    where
        F: FnOnce(&mut Enigo) -> Result<(), InputError> + Send + 'static,
    {
        tokio::task::spawn_blocking(move || {
            let mut enigo = connect()?;
            op(&mut enigo)
        })
        .await
        .map_err(|e| InputError::Task(e.to_string()))?
    }

    async fn button_at(&self, at: Point, direction: Direction) -> Result<(), ChannelError> {
        let (x, y) = screen_position(at)?;
        self.with_enigo(move |enigo| {
            enigo
                .move_mouse(x, y, Coordinate::Abs)
                .map_err(|e| InputError::Failed(e.to_string()))?;
            enigo
                .button(Button::Left, direction)
                .map_err(|e| InputError::Failed(e.to_string()))
        })
        .await?;
        Ok(())
    }
}

fn connect() -> Result<Enigo, InputError> {
    Enigo::new(&Settings::default()).map_err(|e| InputError::Connect(e.to_string()))
}

fn screen_position(at: Point) -> Result<(i32, i32), ChannelError> {
    if !at.x.is_finite() || !at.y.is_finite() {
        return Err(ChannelError::InvalidInput(format!("non-finite point {}", at)));
    }
    Ok((at.x.round() as i32, at.y.round() as i32))
}

#[async_trait]
impl PointerDevice for DesktopInputDevice {
    fn kind(&self) -> ChannelKind {
        ChannelKind::GestureInjector
    }

    async fn is_available(&self) -> bool {
        match tokio::task::spawn_blocking(|| connect().map(drop)).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                debug!("Desktop input unavailable: {}", e);
                false
            }
            Err(e) => {
                debug!("Desktop input check aborted: {}", e);
                false
            }
        }
    }

    async fn pointer_down(&self, at: Point) -> Result<(), ChannelError> {
        self.button_at(at, Direction::Press).await
    }

    async fn pointer_move(&self, to: Point) -> Result<(), ChannelError> {
        let (x, y) = screen_position(to)?;
        self.with_enigo(move |enigo| {
            enigo
                .move_mouse(x, y, Coordinate::Abs)
                .map_err(|e| InputError::Failed(e.to_string()))
        })
        .await?;
        Ok(())
    }

    async fn pointer_up(&self, at: Point) -> Result<(), ChannelError> {
        self.button_at(at, Direction::Release).await
    }

    async fn type_text(&self, text: &str) -> Result<(), ChannelError> {
        if text.is_empty() {
            return Err(ChannelError::InvalidInput("empty text".to_string()));
        }
        let text = text.to_string();
        self.with_enigo(move |enigo| {
            enigo
                .text(&text)
                .map_err(|e| InputError::Failed(e.to_string()))
        })
        .await?;
        Ok(())
    }

    async fn send_key(&self, key_code: i32) -> Result<(), ChannelError> {
        let key = key_for_code(key_code).ok_or(InputError::UnsupportedKey(key_code))?;
        self.with_enigo(move |enigo| {
            enigo
                .key(key, Direction::Click)
                .map_err(|e| InputError::Failed(e.to_string()))
        })
        .await?;
        Ok(())
    }
}
