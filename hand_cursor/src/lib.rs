//! # hand_cursor
//!
//! Hand-gesture cursor controller: per-frame 21-point hand landmarks are
//! classified into gestures, debounced and smoothed by a stateful
//! controller, and delivered to the OS pointer.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Action |
//! |---|---|
//! | Index finger (point) | Move cursor |
//! | Index + middle (peace) | Left click (cooldown) |
//! | Open hand | Right click (cooldown) |
//! | Thumbs up / down | Scroll up / down, one tick per hold interval |
//! | Fist | Drag — press, then move with the button held |
//! | Pinch | Precision mode — reduced-gain cursor movement |
//! | Unknown / no hand | Release any held drag |
//!
//! A gesture must be held for the hold time (default 300 ms) before it
//! acts, so single-frame misclassifications never move the pointer.
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: the status window's mouse and number
//!   keys synthesize hand frames; no camera or detector needed.
//! * `leap` — **Hardware mode**: polls a real LeapMotion controller via
//!   LeapC and projects its digit joints onto the 21-point topology.
//!
//! ### Simulation keys
//!
//! | Key | Effect |
//! |---|---|
//! | `1`–`7` | pose: point / peace / open hand / fist / thumbs up / thumbs down / pinch |
//! | `8` | unrecognized pose |
//! | `0` | hand off (no hand in view) |
//! | mouse | index fingertip position |
//! | `Space` | toggle tracking |
//! | `Q` | quit |

pub mod actuator;
pub mod app;
pub mod source;
pub mod visualizer;
