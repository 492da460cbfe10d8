//! Top-level frame pipeline.
//!
//! `AppState` owns the `CursorController` and the session surface the
//! status window observes: gesture label, hand count, finger readout, and
//! the rolling action log. Frames are handled strictly in delivery order,
//! one at a time — classify, update the controller, dispatch the intents —
//! and the window only ever reads this state, it never mutates it.

use std::collections::VecDeque;
use std::sync::mpsc::{self, TryRecvError};
use std::time::Instant;

use cursor_intent::{ControllerConfig, CursorController, PointerIntent};
use hand_gesture::{classify, Gesture};
use hand_track::{finger_states, FingerVector};

use crate::actuator::{dispatch, open_pointer_output, PointerOut};
use crate::source::{spawn_landmark_source, FrameEvent, SimInput};
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Controller tunables; the screen size is replaced by the actuator's
    /// reported display at startup.
    pub controller: ControllerConfig,
    /// Number of action-log lines kept for the status window.
    pub log_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            controller: ControllerConfig::default(),
            log_capacity: 100,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    controller: CursorController,
    tracking: bool,
    gesture: Gesture,
    fingers: Option<FingerVector>,
    hand_count: usize,
    pub status: String,
    log: VecDeque<String>,
    log_capacity: usize,
}

impl AppState {
    pub fn new(cfg: AppConfig, screen: (i32, i32)) -> Self {
        let controller = CursorController::new(ControllerConfig {
            screen_w: screen.0,
            screen_h: screen.1,
            ..cfg.controller
        });
        let mut state = AppState {
            controller,
            tracking: false,
            gesture: Gesture::NoHand,
            fingers: None,
            hand_count: 0,
            status: "Ready — Space starts tracking".to_string(),
            log: VecDeque::new(),
            log_capacity: cfg.log_capacity.max(1),
        };
        state.push_log("System initialized");
        state
    }

    // ── process one FrameEvent ───────────────────────────────────────────

    pub fn process_frame(&mut self, event: &FrameEvent, now: Instant, out: &mut dyn PointerOut) {
        self.hand_count = event.hands.len();
        let hand = event.hands.first();

        if !self.tracking {
            self.gesture = Gesture::NoHand;
            self.fingers = None;
            return;
        }

        let gesture = match hand {
            Some(h) => classify(h),
            None => Gesture::NoHand,
        };
        self.gesture = gesture;
        self.fingers = hand.map(finger_states);

        let intents = self.controller.update(gesture, hand, now);
        for intent in &intents {
            match *intent {
                PointerIntent::Click(x, y) => {
                    self.push_log(format!("Left click at ({}, {})", x, y));
                }
                PointerIntent::RightClick(x, y) => {
                    self.push_log(format!("Right click at ({}, {})", x, y));
                }
                PointerIntent::ScrollUp => self.push_log("Scrolled up"),
                PointerIntent::ScrollDown => self.push_log("Scrolled down"),
                PointerIntent::DragStart(x, y) => {
                    self.push_log(format!("Started dragging from ({}, {})", x, y));
                }
                PointerIntent::DragEnd => {
                    if gesture == Gesture::NoHand {
                        self.push_log("Stopped dragging (no hands)");
                    } else {
                        self.push_log("Stopped dragging");
                    }
                }
                PointerIntent::Move(..) | PointerIntent::DragMove(..) => {}
            }
            self.deliver(out, intent);
        }
    }

    // ── tracking toggle / teardown ───────────────────────────────────────

    pub fn toggle_tracking(&mut self, out: &mut dyn PointerOut) {
        self.tracking = !self.tracking;
        if self.tracking {
            self.status = "Tracking — hold a gesture to act".to_string();
            self.push_log("Gesture tracking started");
        } else {
            self.release_pointer(out);
            self.gesture = Gesture::NoHand;
            self.fingers = None;
            self.status = "Paused — Space resumes tracking".to_string();
            self.push_log("Gesture tracking stopped");
        }
    }

    pub fn shutdown(&mut self, out: &mut dyn PointerOut) {
        self.release_pointer(out);
        self.push_log("Session closed");
    }

    /// Force the controller back to idle; a held button is always released.
    fn release_pointer(&mut self, out: &mut dyn PointerOut) {
        if let Some(intent) = self.controller.reset() {
            self.push_log("Stopped dragging (forced)");
            self.deliver(out, &intent);
        }
    }

    // ── actuation boundary ───────────────────────────────────────────────

    /// A failed injection is logged and dropped; the controller has
    /// already advanced and the next frame proceeds normally.
    fn deliver(&mut self, out: &mut dyn PointerOut, intent: &PointerIntent) {
        if let Err(e) = dispatch(out, intent) {
            log::warn!("{:?}: {}", intent, e);
            self.push_log(format!("Action failed: {}", e));
        }
    }

    // ── status surface ───────────────────────────────────────────────────

    pub fn push_log(&mut self, line: impl Into<String>) {
        let line = line.into();
        log::info!("{}", line);
        if self.log.len() == self.log_capacity {
            self.log.pop_front();
        }
        self.log.push_back(line);
    }

    pub fn tracking(&self) -> bool {
        self.tracking
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn fingers(&self) -> Option<FingerVector> {
        self.fingers
    }

    pub fn hand_count(&self) -> usize {
        self.hand_count
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    /// The most recent `n` action-log lines, oldest first.
    pub fn log_tail(&self, n: usize) -> impl Iterator<Item = &String> {
        let skip = self.log.len().saturating_sub(n);
        self.log.iter().skip(skip)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// Creates the landmark source (simulation by default, hardware with
/// `--features leap`), the pointer backend, and the status window, then
/// drives the event loop at ~60 fps until the window closes.
pub fn run(cfg: AppConfig) -> Result<(), String> {
    let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();
    let frame_rx = make_source(sim_rx);

    let mut vis = Visualizer::new(sim_tx)?;
    let mut pointer = open_pointer_output();
    let screen = pointer.screen_size();
    let mut app = AppState::new(cfg, screen);

    'session: while vis.is_open() {
        let poll = vis.poll_input();
        if poll.quit {
            break;
        }
        if poll.toggle_tracking {
            app.toggle_tracking(pointer.as_mut());
        }

        // Drain pending frames strictly in delivery order.
        loop {
            match frame_rx.try_recv() {
                Ok(event) => app.process_frame(&event, Instant::now(), pointer.as_mut()),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break 'session,
            }
        }

        vis.render(&app);
    }

    app.shutdown(pointer.as_mut());
    Ok(())
}

#[cfg(not(feature = "leap"))]
fn make_source(sim_rx: mpsc::Receiver<SimInput>) -> mpsc::Receiver<FrameEvent> {
    use crate::source::SimLandmarkSource;
    spawn_landmark_source(SimLandmarkSource { rx: sim_rx })
}

#[cfg(feature = "leap")]
fn make_source(sim_rx: mpsc::Receiver<SimInput>) -> mpsc::Receiver<FrameEvent> {
    use crate::source::LeapLandmarkSource;
    // The window still opens in hardware mode, but its sim inputs go nowhere.
    drop(sim_rx);
    spawn_landmark_source(LeapLandmarkSource)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::InjectError;
    use hand_track::synth;
    use std::time::Duration;

    struct RecordingOut {
        calls: Vec<&'static str>,
        fail: bool,
    }

    impl RecordingOut {
        fn new() -> Self {
            RecordingOut { calls: Vec::new(), fail: false }
        }

        fn record(&mut self, name: &'static str) -> Result<(), InjectError> {
            if self.fail {
                return Err(InjectError::Inject("permission denied".to_string()));
            }
            self.calls.push(name);
            Ok(())
        }
    }

    impl PointerOut for RecordingOut {
        fn move_to(&mut self, _x: i32, _y: i32) -> Result<(), InjectError> {
            self.record("move")
        }
        fn click(&mut self, _x: i32, _y: i32) -> Result<(), InjectError> {
            self.record("click")
        }
        fn right_click(&mut self, _x: i32, _y: i32) -> Result<(), InjectError> {
            self.record("right_click")
        }
        fn scroll(&mut self, _lines: i32) -> Result<(), InjectError> {
            self.record("scroll")
        }
        fn press(&mut self, _x: i32, _y: i32) -> Result<(), InjectError> {
            self.record("press")
        }
        fn release(&mut self) -> Result<(), InjectError> {
            self.record("release")
        }
        fn screen_size(&self) -> (i32, i32) {
            (1000, 1000)
        }
    }

    fn event(frame: Option<hand_track::HandFrame>) -> FrameEvent {
        FrameEvent { hands: frame.into_iter().collect() }
    }

    fn setup() -> (AppState, RecordingOut, Instant) {
        (
            AppState::new(AppConfig::default(), (1000, 1000)),
            RecordingOut::new(),
            Instant::now(),
        )
    }

    fn at(t0: Instant, ms: u64) -> Instant {
        t0 + Duration::from_millis(ms)
    }

    #[test]
    fn frames_are_inert_while_tracking_is_off() {
        let (mut app, mut out, t0) = setup();
        let fist = event(Some(synth::fist_at(0.5, 0.5)));
        app.process_frame(&fist, t0, &mut out);
        app.process_frame(&fist, at(t0, 400), &mut out);
        assert!(out.calls.is_empty());
        assert_eq!(app.gesture(), Gesture::NoHand);
        assert_eq!(app.hand_count(), 1);
    }

    #[test]
    fn held_fist_presses_then_drags() {
        let (mut app, mut out, t0) = setup();
        app.toggle_tracking(&mut out);
        let fist = event(Some(synth::fist_at(0.5, 0.5)));
        app.process_frame(&fist, t0, &mut out);
        app.process_frame(&fist, at(t0, 300), &mut out);
        app.process_frame(&fist, at(t0, 330), &mut out);
        assert_eq!(out.calls, vec!["press", "move"]);
        assert!(app.is_dragging());
    }

    #[test]
    fn disabling_tracking_releases_a_live_drag() {
        let (mut app, mut out, t0) = setup();
        app.toggle_tracking(&mut out);
        let fist = event(Some(synth::fist_at(0.5, 0.5)));
        app.process_frame(&fist, t0, &mut out);
        app.process_frame(&fist, at(t0, 300), &mut out);
        assert!(app.is_dragging());

        app.toggle_tracking(&mut out);
        assert!(!app.is_dragging());
        assert_eq!(out.calls.last(), Some(&"release"));
    }

    #[test]
    fn shutdown_releases_a_live_drag() {
        let (mut app, mut out, t0) = setup();
        app.toggle_tracking(&mut out);
        let fist = event(Some(synth::fist_at(0.5, 0.5)));
        app.process_frame(&fist, t0, &mut out);
        app.process_frame(&fist, at(t0, 300), &mut out);

        app.shutdown(&mut out);
        assert_eq!(out.calls.last(), Some(&"release"));
    }

    #[test]
    fn actuator_failure_leaves_the_session_consistent() {
        let (mut app, mut out, t0) = setup();
        app.toggle_tracking(&mut out);
        let fist = event(Some(synth::fist_at(0.5, 0.5)));
        app.process_frame(&fist, t0, &mut out);

        // The press fails at the OS boundary; the controller still
        // considers the drag live and the next frame carries on.
        out.fail = true;
        app.process_frame(&fist, at(t0, 300), &mut out);
        assert!(out.calls.is_empty());
        assert!(app.is_dragging());

        out.fail = false;
        app.process_frame(&fist, at(t0, 330), &mut out);
        assert_eq!(out.calls, vec!["move"]);
    }

    #[test]
    fn hand_loss_logs_and_releases_once() {
        let (mut app, mut out, t0) = setup();
        app.toggle_tracking(&mut out);
        let fist = event(Some(synth::fist_at(0.5, 0.5)));
        app.process_frame(&fist, t0, &mut out);
        app.process_frame(&fist, at(t0, 300), &mut out);

        let empty = event(None);
        app.process_frame(&empty, at(t0, 330), &mut out);
        app.process_frame(&empty, at(t0, 360), &mut out);
        let releases = out.calls.iter().filter(|c| **c == "release").count();
        assert_eq!(releases, 1);
        assert_eq!(app.hand_count(), 0);
    }

    #[test]
    fn log_is_bounded() {
        let cfg = AppConfig { log_capacity: 5, ..AppConfig::default() };
        let mut app = AppState::new(cfg, (1000, 1000));
        for i in 0..20 {
            app.push_log(format!("line {}", i));
        }
        let lines: Vec<&String> = app.log_tail(100).collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines.last().unwrap().as_str(), "line 19");
    }
}
