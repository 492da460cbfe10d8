//! Software-rendered status window using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ TRACKING ON                         HANDS: 1 │
//! │ ┌──────────────────────────────────────────┐ │
//! │ │                 POINT                    │ │  current gesture
//! │ └──────────────────────────────────────────┘ │
//! │ FINGERS: 0 1 0 0 0                           │
//! │ ┌─ ACTION LOG ─────────────────────────────┐ │
//! │ │ ...                                      │ │
//! │ └──────────────────────────────────────────┘ │
//! │ status bar                                   │
//! │ key legend                                   │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! In simulation mode the window is also the input surface: the mouse
//! position drives the index fingertip and the number keys pick the pose.

use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

use crate::app::AppState;
use crate::source::{SimInput, SimPose};

use std::sync::mpsc::Sender;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W: usize = 560;
pub const WIN_H: usize = 420;

const HEADER_Y: usize = 8;
const GESTURE_Y: usize = 40;
const GESTURE_H: usize = 72;
const FINGERS_Y: usize = 126;
const LOG_Y: usize = 148;
const LOG_H: usize = 216;
const STATUS_Y: usize = WIN_H - 40;
const LEGEND_Y: usize = WIN_H - 16;
const MARGIN: usize = 12;

const BG_COLOR: u32 = 0xFF2B2B2B;
const PANEL_BG: u32 = 0xFF3B3B3B;
const ACCENT: u32 = 0xFFFF4080;
const INFO: u32 = 0xFF4080FF;
const OK_COLOR: u32 = 0xFF00FF00;
const WARN_COLOR: u32 = 0xFFFF4040;
const TEXT_COLOR: u32 = 0xFFCCCCCC;
const DIM_COLOR: u32 = 0xFF888888;
const LOG_BG: u32 = 0xFF000000;

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

/// App-level commands read from the window each loop iteration.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputPoll {
    pub quit: bool,
    pub toggle_tracking: bool,
}

pub struct Visualizer {
    window: Window,
    buf: Vec<u32>,
    sim_tx: Sender<SimInput>,
    last_tip: (f32, f32),
}

impl Visualizer {
    pub fn new(sim_tx: Sender<SimInput>) -> Result<Self, String> {
        let mut window = Window::new(
            "Hand Cursor — Gesture Pointer Control",
            WIN_W,
            WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
            sim_tx,
            last_tip: (0.5, 0.5),
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Poll window input: forward pose/fingertip changes to the simulator
    /// and report app-level commands back to the run loop.
    pub fn poll_input(&mut self) -> InputPoll {
        let mut poll = InputPoll::default();
        if !self.window.is_open() {
            poll.quit = true;
            return poll;
        }

        // Mouse → index fingertip. Camera frames arrive mirrored, so the
        // x-axis is pre-mirrored here and the cursor tracks the pointer.
        if let Some((mx, my)) = self.window.get_mouse_pos(MouseMode::Clamp) {
            let tip = (1.0 - mx / WIN_W as f32, my / WIN_H as f32);
            if tip != self.last_tip {
                self.last_tip = tip;
                let _ = self.sim_tx.send(SimInput::TipAt(tip.0, tip.1));
            }
        }

        if self.window.is_key_pressed(Key::Q, KeyRepeat::No) {
            poll.quit = true;
            return poll;
        }
        if self.window.is_key_pressed(Key::Space, KeyRepeat::No) {
            poll.toggle_tracking = true;
        }

        let poses = [
            (Key::Key1, SimPose::Point),
            (Key::Key2, SimPose::Peace),
            (Key::Key3, SimPose::OpenHand),
            (Key::Key4, SimPose::Fist),
            (Key::Key5, SimPose::ThumbsUp),
            (Key::Key6, SimPose::ThumbsDown),
            (Key::Key7, SimPose::Pinch),
            (Key::Key8, SimPose::Unknown),
        ];
        for (key, pose) in poses {
            if self.window.is_key_pressed(key, KeyRepeat::No) {
                let _ = self.sim_tx.send(SimInput::Pose(pose));
            }
        }
        if self.window.is_key_pressed(Key::Key0, KeyRepeat::No) {
            let _ = self.sim_tx.send(SimInput::HandOff);
        }

        poll
    }

    /// Render one frame of the status surface.
    pub fn render(&mut self, app: &AppState) {
        self.buf.fill(BG_COLOR);

        // ── Header: tracking state + hand count ───────────────────────────
        if app.tracking() {
            self.draw_label("TRACKING ON", MARGIN, HEADER_Y, OK_COLOR);
        } else {
            self.draw_label("TRACKING OFF", MARGIN, HEADER_Y, WARN_COLOR);
        }
        let hands = format!("HANDS: {}", app.hand_count());
        self.draw_label(&hands, WIN_W - MARGIN - hands.len() * 4, HEADER_Y, TEXT_COLOR);

        // ── Gesture panel ─────────────────────────────────────────────────
        self.fill_rect(MARGIN, GESTURE_Y, WIN_W - 2 * MARGIN, GESTURE_H, PANEL_BG);
        self.draw_border(MARGIN, GESTURE_Y, WIN_W - 2 * MARGIN, GESTURE_H, DIM_COLOR);
        self.draw_label("CURRENT GESTURE", MARGIN + 8, GESTURE_Y + 6, DIM_COLOR);
        let label = app.gesture().label();
        let scale = 4;
        let label_w = label.len() * 4 * scale;
        let lx = (WIN_W.saturating_sub(label_w)) / 2;
        self.draw_label_scaled(label, lx, GESTURE_Y + 26, ACCENT, scale);

        // ── Finger vector readout ─────────────────────────────────────────
        let fingers = match app.fingers() {
            Some(v) => format!("FINGERS: {}", v),
            None => "FINGERS: -".to_string(),
        };
        self.draw_label(&fingers, MARGIN, FINGERS_Y, INFO);
        if app.is_dragging() {
            self.draw_label("DRAGGING", WIN_W - MARGIN - 8 * 4, FINGERS_Y, ACCENT);
        }

        // ── Action log ────────────────────────────────────────────────────
        self.fill_rect(MARGIN, LOG_Y, WIN_W - 2 * MARGIN, LOG_H, LOG_BG);
        self.draw_border(MARGIN, LOG_Y, WIN_W - 2 * MARGIN, LOG_H, DIM_COLOR);
        self.draw_label("ACTION LOG", MARGIN + 8, LOG_Y + 6, TEXT_COLOR);
        let mut ly = LOG_Y + 20;
        for line in app.log_tail((LOG_H - 28) / 10) {
            self.draw_label(line, MARGIN + 8, ly, OK_COLOR);
            ly += 10;
        }

        // ── Status bar ────────────────────────────────────────────────────
        self.fill_rect(0, STATUS_Y, WIN_W, 16, PANEL_BG);
        self.draw_label(&app.status, MARGIN, STATUS_Y + 5, TEXT_COLOR);

        // ── Key legend ────────────────────────────────────────────────────
        self.draw_label(
            "1-7=POSE 8=UNKNOWN 0=HAND OFF MOUSE=FINGERTIP SPACE=TRACKING Q=QUIT",
            MARGIN,
            LEGEND_Y,
            DIM_COLOR,
        );

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(WIN_H) {
            for col in x..(x + w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    fn draw_border(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for col in x..(x + w).min(WIN_W) {
            if y < WIN_H {
                self.buf[y * WIN_W + col] = color;
            }
            if y + h - 1 < WIN_H {
                self.buf[(y + h - 1) * WIN_W + col] = color;
            }
        }
        for row in y..(y + h).min(WIN_H) {
            if x < WIN_W {
                self.buf[row * WIN_W + x] = color;
            }
            if x + w - 1 < WIN_W {
                self.buf[row * WIN_W + x + w - 1] = color;
            }
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < WIN_W && y < WIN_H {
            self.buf[y * WIN_W + x] = color;
        }
    }

    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        self.draw_label_scaled(text, x, y, color, 1);
    }

    /// Render `text` with the 3×5 bitmap font, each glyph pixel drawn as a
    /// `scale`×`scale` block.
    fn draw_label_scaled(&mut self, text: &str, x: usize, y: usize, color: u32, scale: usize) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        for dy in 0..scale {
                            for dx in 0..scale {
                                self.set_pixel(
                                    cx + col * scale + dx,
                                    y + row * scale + dy,
                                    color,
                                );
                            }
                        }
                    }
                }
            }
            cx += 4 * scale; // 3 wide + 1 gap
            if cx + 4 * scale > WIN_W {
                break;
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '(' => [0b001, 0b010, 0b010, 0b010, 0b001],
        ')' => [0b100, 0b010, 0b010, 0b010, 0b100],
        '[' => [0b011, 0b010, 0b010, 0b010, 0b011],
        ']' => [0b110, 0b010, 0b010, 0b010, 0b110],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _ => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}
