//! Interactive finger-state explorer over the synthetic hand shapes.

use hand_track::{finger_states, index, synth, HandFrame};
use std::io::{self, Write};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║              Finger State Explorer                       ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    loop {
        print_menu();
        let choice = read_line("Command: ").trim().to_ascii_lowercase();

        match choice.as_str() {
            "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" => {
                let (x, y) = pick_tip();
                let (name, frame) = shape(&choice, x, y);
                show(name, &frame);
            }
            "9" => {
                for c in ["1", "2", "3", "4", "5", "6", "7", "8"] {
                    let (name, frame) = shape(c, 0.5, 0.4);
                    show(name, &frame);
                }
            }
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
    println!("  │  1. Point          5. Thumbs up      9. Show all shapes │");
    println!("  │  2. Peace          6. Thumbs down                       │");
    println!("  │  3. Open hand      7. Pinch          q. Quit            │");
    println!("  │  4. Fist           8. Unknown                           │");
    println!("  └─────────────────────────────────────────────────────────┘");
}

fn shape(choice: &str, x: f32, y: f32) -> (&'static str, HandFrame) {
    match choice {
        "1" => ("point", synth::point_at(x, y)),
        "2" => ("peace", synth::peace_at(x, y)),
        "3" => ("open hand", synth::open_hand_at(x, y)),
        "4" => ("fist", synth::fist_at(x, y)),
        "5" => ("thumbs up", synth::thumbs_up_at(x, y)),
        "6" => ("thumbs down", synth::thumbs_down_at(x, y)),
        "7" => ("pinch", synth::pinch_at(x, y)),
        _ => ("unknown", synth::unknown_at(x, y)),
    }
}

fn show(name: &str, frame: &HandFrame) {
    let v = finger_states(frame);
    let tip = frame[index::INDEX_TIP];
    let pinch = frame[index::THUMB_TIP].distance(&frame[index::INDEX_TIP]);
    println!(
        "  {:<11}  fingers {}  index tip ({:.3}, {:.3})  thumb-index dist {:.3}",
        name, v, tip.x, tip.y, pinch
    );
}

fn pick_tip() -> (f32, f32) {
    let x: f32 = read_line("  Index tip x 0–1 (default 0.5): ")
        .trim()
        .parse()
        .unwrap_or(0.5);
    let y: f32 = read_line("  Index tip y 0–1 (default 0.4): ")
        .trim()
        .parse()
        .unwrap_or(0.4);
    (x.clamp(0.0, 1.0), y.clamp(0.0, 1.0))
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
