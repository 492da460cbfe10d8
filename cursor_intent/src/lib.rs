//! # cursor_intent
//!
//! The per-frame transform from `(gesture, landmarks, now)` to a sequence
//! of [`PointerIntent`]s. [`CursorController`] owns all session state:
//! the temporal debounce, the hold-time gate, the exponentially smoothed
//! cursor position, the click cooldown, and the drag lifecycle.
//!
//! Time never comes from the wall clock here — the caller passes `now`
//! into every [`CursorController::update`], so tests drive elapsed time
//! with plain `Instant` arithmetic instead of sleeping.
//!
//! ## Temporal rules
//!
//! * A gesture must be held unchanged for the hold time (default 300 ms)
//!   before it acts; the transition frame itself is always silent.
//! * Click-type actions share one cooldown (default 500 ms).
//! * Scroll gestures re-arm the hold timer after each tick, so a held
//!   thumb scrolls once per hold interval rather than every frame.
//! * Losing the hand releases a live drag immediately, exactly once.

use std::time::{Duration, Instant};

use hand_gesture::Gesture;
use hand_track::{index, HandFrame};

// ════════════════════════════════════════════════════════════════════════════
// PointerIntent
// ════════════════════════════════════════════════════════════════════════════

/// One pointer action the controller wants performed. Coordinates are
/// absolute screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerIntent {
    Move(i32, i32),
    Click(i32, i32),
    RightClick(i32, i32),
    ScrollUp,
    ScrollDown,
    DragStart(i32, i32),
    DragMove(i32, i32),
    DragEnd,
}

// ════════════════════════════════════════════════════════════════════════════
// ControllerConfig
// ════════════════════════════════════════════════════════════════════════════

/// Tunables for one controller session.
#[derive(Clone, Debug)]
pub struct ControllerConfig {
    pub screen_w: i32,
    pub screen_h: i32,
    /// Minimum time a gesture must be held unchanged before it acts.
    pub hold_time: Duration,
    /// Minimum interval between click-type actions.
    pub click_cooldown: Duration,
    /// Weight of the previous position in the exponential smoother.
    pub smoothing: f32,
    /// Same weight in pinch precision mode; closer to 1.0 moves slower.
    pub precision_smoothing: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        ControllerConfig {
            screen_w: 1920,
            screen_h: 1080,
            hold_time: Duration::from_millis(300),
            click_cooldown: Duration::from_millis(500),
            smoothing: 0.7,
            precision_smoothing: 0.9,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// CursorController
// ════════════════════════════════════════════════════════════════════════════

/// Stateful gesture-to-intent controller. One instance per tracking
/// session; independent instances share nothing.
pub struct CursorController {
    cfg: ControllerConfig,
    last_gesture: Gesture,
    gesture_start: Option<Instant>,
    last_x: f32,
    last_y: f32,
    dragging: bool,
    drag_origin: Option<(i32, i32)>,
    last_click: Option<Instant>,
}

impl CursorController {
    pub fn new(cfg: ControllerConfig) -> Self {
        let last_x = cfg.screen_w as f32 / 2.0;
        let last_y = cfg.screen_h as f32 / 2.0;
        CursorController {
            cfg,
            last_gesture: Gesture::NoHand,
            gesture_start: None,
            last_x,
            last_y,
            dragging: false,
            drag_origin: None,
            last_click: None,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.cfg
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Where the drag currently in progress started, if any.
    pub fn drag_origin(&self) -> Option<(i32, i32)> {
        self.drag_origin
    }

    /// Current smoothed cursor position in screen pixels.
    pub fn position(&self) -> (i32, i32) {
        (self.last_x as i32, self.last_y as i32)
    }

    /// Process one frame.
    ///
    /// `hand` is the tracked hand the gesture was classified from, or
    /// `None` when the detector sees nothing this frame.
    pub fn update(
        &mut self,
        gesture: Gesture,
        hand: Option<&HandFrame>,
        now: Instant,
    ) -> Vec<PointerIntent> {
        let mut out = Vec::new();

        // Hand loss must release a held drag at once; everything else
        // waits for the hand to come back.
        let hand = match hand {
            Some(h) if gesture != Gesture::NoHand => h,
            _ => {
                out.extend(self.end_drag());
                self.last_gesture = Gesture::NoHand;
                self.gesture_start = None;
                return out;
            }
        };

        // A changed gesture restarts the hold timer and stays silent —
        // single-frame misclassifications never reach the actuator.
        if gesture != self.last_gesture {
            self.last_gesture = gesture;
            self.gesture_start = Some(now);
            return out;
        }
        let started = match self.gesture_start {
            Some(t) => t,
            None => {
                self.gesture_start = Some(now);
                return out;
            }
        };
        if now.duration_since(started) < self.cfg.hold_time {
            return out;
        }

        // Index fingertip → mirrored screen coordinates, then the
        // exponential smoother. Clamped so the stored position always
        // stays on screen, even for a fingertip at the frame edge.
        let tip = hand[index::INDEX_TIP];
        let raw_x = ((1.0 - tip.x) * self.cfg.screen_w as f32)
            .clamp(0.0, self.cfg.screen_w as f32 - 1.0);
        let raw_y = (tip.y * self.cfg.screen_h as f32).clamp(0.0, self.cfg.screen_h as f32 - 1.0);
        let a = self.cfg.smoothing;
        self.last_x = self.last_x * a + raw_x * (1.0 - a);
        self.last_y = self.last_y * a + raw_y * (1.0 - a);
        let (sx, sy) = self.position();

        match gesture {
            Gesture::Point => out.push(PointerIntent::Move(sx, sy)),

            Gesture::Peace => {
                if self.click_ready(now) {
                    out.push(PointerIntent::Click(sx, sy));
                    self.last_click = Some(now);
                }
            }

            Gesture::OpenHand => {
                if self.click_ready(now) {
                    out.push(PointerIntent::RightClick(sx, sy));
                    self.last_click = Some(now);
                }
            }

            Gesture::ThumbsUp => {
                out.push(PointerIntent::ScrollUp);
                // Re-arm the hold gate: one tick per hold interval.
                self.gesture_start = Some(now);
            }

            Gesture::ThumbsDown => {
                out.push(PointerIntent::ScrollDown);
                self.gesture_start = Some(now);
            }

            Gesture::Fist => {
                if self.dragging {
                    out.push(PointerIntent::DragMove(sx, sy));
                } else {
                    self.dragging = true;
                    self.drag_origin = Some((sx, sy));
                    out.push(PointerIntent::DragStart(sx, sy));
                }
            }

            Gesture::Pinch => {
                // Precision mode: re-smooth from the raw sample with the
                // slower factor and keep that as the stored position.
                let p = self.cfg.precision_smoothing;
                self.last_x = self.last_x * p + raw_x * (1.0 - p);
                self.last_y = self.last_y * p + raw_y * (1.0 - p);
                let (px, py) = self.position();
                out.push(PointerIntent::Move(px, py));
            }

            Gesture::Unknown => out.extend(self.end_drag()),

            // Handled by the hand-loss path above.
            Gesture::NoHand => {}
        }

        out
    }

    /// Force-reset all session state, as on tracking-disable or teardown.
    /// Returns the `DragEnd` that must still be delivered if a drag was
    /// live, so the pointer is never left with a button held.
    pub fn reset(&mut self) -> Option<PointerIntent> {
        let pending = self.end_drag();
        self.last_gesture = Gesture::NoHand;
        self.gesture_start = None;
        self.last_click = None;
        self.last_x = self.cfg.screen_w as f32 / 2.0;
        self.last_y = self.cfg.screen_h as f32 / 2.0;
        pending
    }

    fn end_drag(&mut self) -> Option<PointerIntent> {
        if self.dragging {
            self.dragging = false;
            self.drag_origin = None;
            Some(PointerIntent::DragEnd)
        } else {
            None
        }
    }

    fn click_ready(&self, now: Instant) -> bool {
        match self.last_click {
            None => true,
            Some(t) => now.duration_since(t) > self.cfg.click_cooldown,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_track::synth;

    fn cfg() -> ControllerConfig {
        ControllerConfig {
            screen_w: 1000,
            screen_h: 1000,
            ..ControllerConfig::default()
        }
    }

    fn ctl() -> (CursorController, Instant) {
        (CursorController::new(cfg()), Instant::now())
    }

    fn at(t0: Instant, ms: u64) -> Instant {
        t0 + Duration::from_millis(ms)
    }

    #[test]
    fn transition_frame_is_silent() {
        let (mut c, t0) = ctl();
        let frame = synth::point_at(0.5, 0.5);
        assert!(c.update(Gesture::Point, Some(&frame), t0).is_empty());
    }

    #[test]
    fn hold_gate_blocks_until_elapsed() {
        let (mut c, t0) = ctl();
        let frame = synth::point_at(0.5, 0.5);
        c.update(Gesture::Point, Some(&frame), t0);
        assert!(c.update(Gesture::Point, Some(&frame), at(t0, 100)).is_empty());
        assert!(c.update(Gesture::Point, Some(&frame), at(t0, 299)).is_empty());
        let intents = c.update(Gesture::Point, Some(&frame), at(t0, 300));
        assert!(matches!(intents.as_slice(), [PointerIntent::Move(_, _)]));
    }

    #[test]
    fn gesture_change_restarts_the_hold_timer() {
        let (mut c, t0) = ctl();
        let point = synth::point_at(0.5, 0.5);
        let peace = synth::peace_at(0.5, 0.5);
        c.update(Gesture::Point, Some(&point), t0);
        c.update(Gesture::Point, Some(&point), at(t0, 300));
        // Switch: the transition frame and the young-hold frames stay quiet.
        assert!(c.update(Gesture::Peace, Some(&peace), at(t0, 330)).is_empty());
        assert!(c.update(Gesture::Peace, Some(&peace), at(t0, 500)).is_empty());
        let intents = c.update(Gesture::Peace, Some(&peace), at(t0, 630));
        assert!(matches!(intents.as_slice(), [PointerIntent::Click(_, _)]));
    }

    #[test]
    fn click_cooldown_blocks_then_releases() {
        let (mut c, t0) = ctl();
        let peace = synth::peace_at(0.5, 0.5);
        c.update(Gesture::Peace, Some(&peace), t0);
        let first = c.update(Gesture::Peace, Some(&peace), at(t0, 300));
        assert!(matches!(first.as_slice(), [PointerIntent::Click(_, _)]));
        // 200 ms after the click: still cooling down.
        assert!(c.update(Gesture::Peace, Some(&peace), at(t0, 500)).is_empty());
        // 600 ms after the click: fires again.
        let second = c.update(Gesture::Peace, Some(&peace), at(t0, 900));
        assert!(matches!(second.as_slice(), [PointerIntent::Click(_, _)]));
    }

    #[test]
    fn click_kinds_share_one_cooldown() {
        let (mut c, t0) = ctl();
        let peace = synth::peace_at(0.5, 0.5);
        let open = synth::open_hand_at(0.5, 0.5);
        c.update(Gesture::Peace, Some(&peace), t0);
        c.update(Gesture::Peace, Some(&peace), at(t0, 300));
        c.update(Gesture::OpenHand, Some(&open), at(t0, 330));
        // Hold satisfied at 630, but the left click at 300 still cools.
        assert!(c.update(Gesture::OpenHand, Some(&open), at(t0, 700)).is_empty());
        let intents = c.update(Gesture::OpenHand, Some(&open), at(t0, 900));
        assert!(matches!(intents.as_slice(), [PointerIntent::RightClick(_, _)]));
    }

    #[test]
    fn held_scroll_ticks_once_per_hold_interval() {
        let (mut c, t0) = ctl();
        let up = synth::thumbs_up_at(0.5, 0.5);
        c.update(Gesture::ThumbsUp, Some(&up), t0);
        assert_eq!(
            c.update(Gesture::ThumbsUp, Some(&up), at(t0, 300)),
            vec![PointerIntent::ScrollUp]
        );
        assert!(c.update(Gesture::ThumbsUp, Some(&up), at(t0, 330)).is_empty());
        assert!(c.update(Gesture::ThumbsUp, Some(&up), at(t0, 550)).is_empty());
        assert_eq!(
            c.update(Gesture::ThumbsUp, Some(&up), at(t0, 600)),
            vec![PointerIntent::ScrollUp]
        );
    }

    #[test]
    fn thumbs_down_scrolls_down() {
        let (mut c, t0) = ctl();
        let down = synth::thumbs_down_at(0.5, 0.5);
        c.update(Gesture::ThumbsDown, Some(&down), t0);
        assert_eq!(
            c.update(Gesture::ThumbsDown, Some(&down), at(t0, 300)),
            vec![PointerIntent::ScrollDown]
        );
    }

    #[test]
    fn drag_lifecycle_start_move_end() {
        let (mut c, t0) = ctl();
        let fist = synth::fist_at(0.5, 0.5);
        let unknown = synth::unknown_at(0.5, 0.5);

        c.update(Gesture::Fist, Some(&fist), t0);
        let start = c.update(Gesture::Fist, Some(&fist), at(t0, 300));
        assert!(matches!(start.as_slice(), [PointerIntent::DragStart(_, _)]));
        assert!(c.is_dragging());
        assert!(c.drag_origin().is_some());

        let moves = c.update(Gesture::Fist, Some(&fist), at(t0, 330));
        assert!(matches!(moves.as_slice(), [PointerIntent::DragMove(_, _)]));

        // Unknown goes through debounce + hold before releasing.
        assert!(c.update(Gesture::Unknown, Some(&unknown), at(t0, 400)).is_empty());
        let end = c.update(Gesture::Unknown, Some(&unknown), at(t0, 700));
        assert_eq!(end, vec![PointerIntent::DragEnd]);
        assert!(!c.is_dragging());
        assert!(c.drag_origin().is_none());

        // Further unknown frames are already idle.
        assert!(c.update(Gesture::Unknown, Some(&unknown), at(t0, 730)).is_empty());
    }

    #[test]
    fn hand_loss_ends_drag_exactly_once() {
        let (mut c, t0) = ctl();
        let fist = synth::fist_at(0.5, 0.5);
        c.update(Gesture::Fist, Some(&fist), t0);
        c.update(Gesture::Fist, Some(&fist), at(t0, 300));
        assert!(c.is_dragging());

        // Hand disappears: release fires immediately, no debounce.
        let lost = c.update(Gesture::NoHand, None, at(t0, 310));
        assert_eq!(lost, vec![PointerIntent::DragEnd]);
        for ms in [340, 370, 400] {
            assert!(c.update(Gesture::NoHand, None, at(t0, ms)).is_empty());
        }
    }

    #[test]
    fn pointing_keeps_a_drag_alive() {
        let (mut c, t0) = ctl();
        let fist = synth::fist_at(0.5, 0.5);
        let point = synth::point_at(0.5, 0.5);
        c.update(Gesture::Fist, Some(&fist), t0);
        c.update(Gesture::Fist, Some(&fist), at(t0, 300));

        c.update(Gesture::Point, Some(&point), at(t0, 330));
        let intents = c.update(Gesture::Point, Some(&point), at(t0, 700));
        assert!(matches!(intents.as_slice(), [PointerIntent::Move(_, _)]));
        assert!(c.is_dragging());
    }

    #[test]
    fn smoothing_converges_without_overshoot() {
        let (mut c, t0) = ctl();
        // Fingertip fixed at x=0.2 → raw (800, 800) on the 1000px screen.
        let frame = synth::point_at(0.2, 0.8);
        let raw = 800.0f32;

        c.update(Gesture::Point, Some(&frame), t0);
        let mut prev_gap = (raw - 500.0).abs();
        for i in 0..60u64 {
            c.update(Gesture::Point, Some(&frame), at(t0, 300 + i * 33));
            let (x, y) = c.position();
            let gap = (raw - x as f32).abs();
            assert!(gap <= prev_gap, "smoothing diverged at step {}", i);
            assert!(x as f32 <= raw && y as f32 <= raw, "smoothing overshot");
            prev_gap = gap;
        }
        // Converged to the raw target within integer truncation.
        let (x, y) = c.position();
        assert!((raw - x as f32) <= 1.0 && (raw - y as f32) <= 1.0);
    }

    #[test]
    fn smoothed_position_stays_on_screen() {
        let (mut c, t0) = ctl();
        // Mirrored x: a fingertip at the left frame edge maps to the far
        // right column, which must clamp inside the screen.
        let frame = synth::point_at(0.0, 1.0);
        c.update(Gesture::Point, Some(&frame), t0);
        for i in 0..100u64 {
            c.update(Gesture::Point, Some(&frame), at(t0, 300 + i * 33));
            let (x, y) = c.position();
            assert!(x >= 0 && x < 1000);
            assert!(y >= 0 && y < 1000);
        }
        // Settles against the inclusive far edge, never reaching 1000.
        let (x, y) = c.position();
        assert!(x >= 998 && y >= 998);
    }

    #[test]
    fn pinch_applies_the_slow_factor_on_raw() {
        let (mut c, t0) = ctl();
        let frame = synth::pinch_at(0.2, 0.8);
        c.update(Gesture::Pinch, Some(&frame), t0);
        let intents = c.update(Gesture::Pinch, Some(&frame), at(t0, 300));

        // First the normal smoother runs, then the precision pass
        // re-blends the raw sample with the slower factor.
        let raw = 800.0f32;
        let smoothed = 500.0 * 0.7 + raw * 0.3;
        let expected = (smoothed * 0.9 + raw * 0.1) as i32;
        assert_eq!(intents, vec![PointerIntent::Move(expected, expected)]);
        assert_eq!(c.position(), (expected, expected));
    }

    #[test]
    fn reset_releases_a_live_drag_and_recentres() {
        let (mut c, t0) = ctl();
        let fist = synth::fist_at(0.2, 0.8);
        c.update(Gesture::Fist, Some(&fist), t0);
        c.update(Gesture::Fist, Some(&fist), at(t0, 300));
        assert!(c.is_dragging());

        assert_eq!(c.reset(), Some(PointerIntent::DragEnd));
        assert!(!c.is_dragging());
        assert_eq!(c.position(), (500, 500));

        // Idle reset has nothing to release.
        assert_eq!(c.reset(), None);
    }

    #[test]
    fn sessions_are_independent() {
        let (mut a, t0) = ctl();
        let mut b = CursorController::new(cfg());
        let fist = synth::fist_at(0.5, 0.5);
        a.update(Gesture::Fist, Some(&fist), t0);
        a.update(Gesture::Fist, Some(&fist), at(t0, 300));
        assert!(a.is_dragging());
        assert!(!b.is_dragging());
        assert!(b.update(Gesture::NoHand, None, at(t0, 300)).is_empty());
    }
}
