//! Interactive gesture classification menu over the synthetic shapes.

use hand_gesture::{classify, PINCH_MAX_DIST};
use hand_track::{finger_states, index, synth, HandFrame, Landmark};
use std::io::{self, Write};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║              Gesture Classifier Explorer                 ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    loop {
        print_menu();
        let choice = read_line("Command: ").trim().to_ascii_lowercase();

        match choice.as_str() {
            "1" => {
                for (name, frame) in all_shapes() {
                    let v = finger_states(&frame);
                    println!("  {:<11}  fingers {}  →  {}", name, v, classify(&frame));
                }
            }
            "2" => pinch_sweep(),
            "q" | "quit" => {
                println!("\nGoodbye!\n");
                break;
            }
            _ => println!("  ⚠  Unknown command."),
        }
        println!();
    }
}

fn print_menu() {
    println!("  ┌─────────────────────────────────────────────────────────┐");
    println!("  │  1. Classify every synthetic shape                      │");
    println!("  │  2. Pinch distance sweep                                │");
    println!("  │  q. Quit                                                │");
    println!("  └─────────────────────────────────────────────────────────┘");
}

fn all_shapes() -> Vec<(&'static str, HandFrame)> {
    vec![
        ("point", synth::point_at(0.5, 0.4)),
        ("peace", synth::peace_at(0.5, 0.4)),
        ("open hand", synth::open_hand_at(0.5, 0.4)),
        ("fist", synth::fist_at(0.5, 0.4)),
        ("thumbs up", synth::thumbs_up_at(0.5, 0.5)),
        ("thumbs down", synth::thumbs_down_at(0.5, 0.5)),
        ("pinch", synth::pinch_at(0.5, 0.4)),
        ("unknown", synth::unknown_at(0.5, 0.4)),
    ]
}

/// Walk the thumb tip away from the index tip and show where the
/// classification flips from pinch to unknown.
fn pinch_sweep() {
    println!("  Threshold: {} (exclusive)\n", PINCH_MAX_DIST);
    for step in 0..8 {
        let dist = step as f32 * 0.01;
        let mut pts = *synth::pinch_at(0.5, 0.4).points();
        let tip = pts[index::INDEX_TIP];
        pts[index::THUMB_TIP] = Landmark::new(tip.x - dist, tip.y);
        // Keep the thumb reading as extended so no named shape matches.
        pts[index::PIPS[0]] = Landmark::new(tip.x + 0.02, tip.y + 0.05);
        let frame = HandFrame::new(pts);
        let d = frame[index::THUMB_TIP].distance(&frame[index::INDEX_TIP]);
        println!("  tip distance {:.3}  →  {}", d, classify(&frame));
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
