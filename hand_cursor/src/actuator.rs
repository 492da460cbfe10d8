//! Pointer injection boundary.
//!
//! [`PointerIntent`]s become OS-level pointer calls behind the
//! [`PointerOut`] trait. Every injection can fail (platform permission
//! denial, missing display server); failures are returned to the caller,
//! which logs and drops them — nothing is retried, and a failed action
//! never touches controller state.

use cursor_intent::PointerIntent;
use thiserror::Error;

use enigo::{Axis, Button, Coordinate, Direction, Enigo, Mouse, Settings};

/// Wheel lines moved per scroll intent.
const SCROLL_STEP: i32 = 3;

// ════════════════════════════════════════════════════════════════════════════
// InjectError
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum InjectError {
    #[error("pointer backend unavailable: {0}")]
    Unavailable(String),
    #[error("pointer injection failed: {0}")]
    Inject(String),
}

// ════════════════════════════════════════════════════════════════════════════
// PointerOut — abstraction over enigo / null (for headless and testing)
// ════════════════════════════════════════════════════════════════════════════

pub trait PointerOut {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), InjectError>;
    fn click(&mut self, x: i32, y: i32) -> Result<(), InjectError>;
    fn right_click(&mut self, x: i32, y: i32) -> Result<(), InjectError>;
    /// Positive scrolls up, negative down.
    fn scroll(&mut self, lines: i32) -> Result<(), InjectError>;
    /// Press and hold the primary button at `(x, y)`.
    fn press(&mut self, x: i32, y: i32) -> Result<(), InjectError>;
    fn release(&mut self) -> Result<(), InjectError>;
    /// Primary display size in pixels.
    fn screen_size(&self) -> (i32, i32);
}

// ── enigo backend ─────────────────────────────────────────────────────────

pub struct EnigoOut {
    enigo: Enigo,
    screen: (i32, i32),
}

impl EnigoOut {
    pub fn new() -> Result<Self, InjectError> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| InjectError::Unavailable(e.to_string()))?;
        let screen = enigo
            .main_display()
            .map_err(|e| InjectError::Unavailable(e.to_string()))?;
        Ok(EnigoOut { enigo, screen })
    }

    fn inject(result: enigo::InputResult<()>) -> Result<(), InjectError> {
        result.map_err(|e| InjectError::Inject(e.to_string()))
    }
}

impl PointerOut for EnigoOut {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), InjectError> {
        Self::inject(self.enigo.move_mouse(x, y, Coordinate::Abs))
    }

    fn click(&mut self, x: i32, y: i32) -> Result<(), InjectError> {
        self.move_to(x, y)?;
        Self::inject(self.enigo.button(Button::Left, Direction::Click))
    }

    fn right_click(&mut self, x: i32, y: i32) -> Result<(), InjectError> {
        self.move_to(x, y)?;
        Self::inject(self.enigo.button(Button::Right, Direction::Click))
    }

    fn scroll(&mut self, lines: i32) -> Result<(), InjectError> {
        // enigo's vertical axis is positive-down.
        Self::inject(self.enigo.scroll(-lines, Axis::Vertical))
    }

    fn press(&mut self, x: i32, y: i32) -> Result<(), InjectError> {
        self.move_to(x, y)?;
        Self::inject(self.enigo.button(Button::Left, Direction::Press))
    }

    fn release(&mut self) -> Result<(), InjectError> {
        Self::inject(self.enigo.button(Button::Left, Direction::Release))
    }

    fn screen_size(&self) -> (i32, i32) {
        self.screen
    }
}

// ── null backend (used when injection is unavailable) ─────────────────────

pub struct NullOut {
    screen: (i32, i32),
}

impl Default for NullOut {
    fn default() -> Self {
        NullOut { screen: (1920, 1080) }
    }
}

impl PointerOut for NullOut {
    fn move_to(&mut self, _x: i32, _y: i32) -> Result<(), InjectError> {
        Ok(())
    }
    fn click(&mut self, _x: i32, _y: i32) -> Result<(), InjectError> {
        Ok(())
    }
    fn right_click(&mut self, _x: i32, _y: i32) -> Result<(), InjectError> {
        Ok(())
    }
    fn scroll(&mut self, _lines: i32) -> Result<(), InjectError> {
        Ok(())
    }
    fn press(&mut self, _x: i32, _y: i32) -> Result<(), InjectError> {
        Ok(())
    }
    fn release(&mut self) -> Result<(), InjectError> {
        Ok(())
    }
    fn screen_size(&self) -> (i32, i32) {
        self.screen
    }
}

// ════════════════════════════════════════════════════════════════════════════
// open_pointer_output — pick the backend
// ════════════════════════════════════════════════════════════════════════════

/// Try to open the real pointer backend.
/// Falls back to `NullOut` with a warning if the platform refuses, so the
/// rest of the pipeline keeps running without pointer effects.
pub fn open_pointer_output() -> Box<dyn PointerOut> {
    match EnigoOut::new() {
        Ok(out) => {
            let (w, h) = out.screen_size();
            log::info!("pointer backend ready, display {}x{}", w, h);
            Box::new(out)
        }
        Err(e) => {
            log::warn!("{} — pointer actions disabled, using null output", e);
            Box::new(NullOut::default())
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// dispatch — one intent, one call
// ════════════════════════════════════════════════════════════════════════════

/// Translate one intent into exactly one pointer call.
pub fn dispatch(out: &mut dyn PointerOut, intent: &PointerIntent) -> Result<(), InjectError> {
    match *intent {
        PointerIntent::Move(x, y) | PointerIntent::DragMove(x, y) => out.move_to(x, y),
        PointerIntent::Click(x, y) => out.click(x, y),
        PointerIntent::RightClick(x, y) => out.right_click(x, y),
        PointerIntent::ScrollUp => out.scroll(SCROLL_STEP),
        PointerIntent::ScrollDown => out.scroll(-SCROLL_STEP),
        PointerIntent::DragStart(x, y) => out.press(x, y),
        PointerIntent::DragEnd => out.release(),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_backend_accepts_every_intent() {
        let mut out = NullOut::default();
        let intents = [
            PointerIntent::Move(10, 10),
            PointerIntent::Click(10, 10),
            PointerIntent::RightClick(10, 10),
            PointerIntent::ScrollUp,
            PointerIntent::ScrollDown,
            PointerIntent::DragStart(10, 10),
            PointerIntent::DragMove(20, 20),
            PointerIntent::DragEnd,
        ];
        for intent in &intents {
            assert!(dispatch(&mut out, intent).is_ok(), "{:?}", intent);
        }
    }

    #[test]
    fn null_backend_reports_a_screen() {
        let out = NullOut::default();
        let (w, h) = out.screen_size();
        assert!(w > 0 && h > 0);
    }
}
