//! Scripted controller trace: replays a gesture timeline against a
//! [`CursorController`] on a virtual clock and prints every emitted intent.

use std::time::{Duration, Instant};

use cursor_intent::{ControllerConfig, CursorController};
use hand_gesture::{classify, Gesture};
use hand_track::{synth, HandFrame};

fn main() {
    println!("\n=== Cursor Intent Trace ===\n");

    let cfg = ControllerConfig {
        screen_w: 1280,
        screen_h: 720,
        ..ControllerConfig::default()
    };
    println!(
        "screen {}x{}  hold {:?}  cooldown {:?}  smoothing {}\n",
        cfg.screen_w, cfg.screen_h, cfg.hold_time, cfg.click_cooldown, cfg.smoothing
    );

    let mut controller = CursorController::new(cfg);
    let t0 = Instant::now();

    // Timeline: (millis, frame). Frames arrive every 33 ms as from a
    // 30 fps camera; gestures are classified exactly as in the live path.
    let mut timeline: Vec<(u64, Option<HandFrame>)> = Vec::new();
    push(&mut timeline, 0, 600, Some(synth::point_at(0.35, 0.40)));
    push(&mut timeline, 600, 1200, Some(synth::peace_at(0.35, 0.40)));
    push(&mut timeline, 1200, 2400, Some(synth::thumbs_up_at(0.40, 0.50)));
    push(&mut timeline, 2400, 3300, Some(synth::fist_at(0.45, 0.55)));
    push(&mut timeline, 3300, 3500, Some(synth::unknown_at(0.45, 0.55)));
    push(&mut timeline, 3500, 3700, None);

    for (ms, frame) in timeline {
        let now = t0 + Duration::from_millis(ms);
        let gesture = match &frame {
            Some(f) => classify(f),
            None => Gesture::NoHand,
        };
        let intents = controller.update(gesture, frame.as_ref(), now);
        for intent in intents {
            println!("  [{:>5} ms]  {:<11}  →  {:?}", ms, gesture.label(), intent);
        }
    }

    println!("\n  final position {:?}, dragging: {}\n", controller.position(), controller.is_dragging());
}

fn push(timeline: &mut Vec<(u64, Option<HandFrame>)>, from: u64, until: u64, frame: Option<HandFrame>) {
    let mut t = from;
    while t < until {
        timeline.push((t, frame.clone()));
        t += 33;
    }
}
