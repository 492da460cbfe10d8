//! hand_cursor — interactive entry point.

use std::io::{self, Write};
use std::time::Duration;

use cursor_intent::ControllerConfig;
use hand_cursor::app::{run, AppConfig};

fn main() {
    env_logger::init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Hand Cursor — Gesture Pointer Controller              ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Window simulation  (use --features leap for hardware)");
    println!();

    let cfg = if std::env::args().any(|a| a == "--quick") {
        println!("  Quick-start: 300 ms hold, 500 ms cooldown, 0.70 smoothing\n");
        AppConfig::default()
    } else {
        configure_interactively()
    };

    println!();
    println!("  Opening status window…");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn configure_interactively() -> AppConfig {
    println!("  Configure timings (Enter keeps the default):");

    let hold_ms: u64 = {
        let v = read_line("  Gesture hold time ms (default 300): ")
            .trim()
            .parse()
            .unwrap_or(300);
        v.clamp(50, 2000)
    };
    let cooldown_ms: u64 = {
        let v = read_line("  Click cooldown ms (default 500): ")
            .trim()
            .parse()
            .unwrap_or(500);
        v.clamp(100, 5000)
    };
    let smoothing = pick_factor("  Cursor smoothing 0–95 percent (default 70): ", 70);
    let precision = pick_factor("  Precision smoothing 0–95 percent (default 90): ", 90);

    AppConfig {
        controller: ControllerConfig {
            hold_time: Duration::from_millis(hold_ms),
            click_cooldown: Duration::from_millis(cooldown_ms),
            smoothing,
            precision_smoothing: precision,
            ..ControllerConfig::default()
        },
        ..AppConfig::default()
    }
}

fn pick_factor(prompt: &str, default_percent: u32) -> f32 {
    let percent: u32 = read_line(prompt).trim().parse().unwrap_or(default_percent);
    percent.min(95) as f32 / 100.0
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
