//! # hand_gesture
//!
//! Maps one [`HandFrame`] to one discrete [`Gesture`].
//!
//! Classification runs in two stages. The boolean finger vector is matched
//! against the named shapes first, in a fixed order; only when no shape
//! matches does the continuous pinch test run, so a partially bent thumb
//! and index can still register as a pinch even though their boolean
//! states are ambiguous.

use std::fmt;

use hand_track::{finger_states, index, HandFrame};

/// Maximum thumb-tip to index-tip distance (normalized units) that counts
/// as a pinch. The boundary is exclusive.
pub const PINCH_MAX_DIST: f32 = 0.05;

// ════════════════════════════════════════════════════════════════════════════
// Gesture
// ════════════════════════════════════════════════════════════════════════════

/// The closed set of recognized gestures. `NoHand` means the detector
/// currently reports no hand at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    Point,
    Peace,
    OpenHand,
    Fist,
    ThumbsUp,
    ThumbsDown,
    Pinch,
    Unknown,
    NoHand,
}

impl Gesture {
    /// Display label for status surfaces.
    pub fn label(&self) -> &'static str {
        match self {
            Gesture::Point => "POINT",
            Gesture::Peace => "PEACE",
            Gesture::OpenHand => "OPEN HAND",
            Gesture::Fist => "FIST",
            Gesture::ThumbsUp => "THUMBS UP",
            Gesture::ThumbsDown => "THUMBS DOWN",
            Gesture::Pinch => "PINCH",
            Gesture::Unknown => "UNKNOWN",
            Gesture::NoHand => "NO HAND",
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Classification
// ════════════════════════════════════════════════════════════════════════════

/// Classify one hand observation. Never returns [`Gesture::NoHand`]; that
/// state belongs to the caller, which knows whether a hand was detected.
pub fn classify(hand: &HandFrame) -> Gesture {
    let fingers = finger_states(hand);

    match fingers.as_array() {
        [false, true, false, false, false] => return Gesture::Point,
        [false, true, true, false, false] => return Gesture::Peace,
        [true, true, true, true, true] => return Gesture::OpenHand,
        [false, false, false, false, false] => return Gesture::Fist,
        [true, false, false, false, false] => {
            // Thumb orientation: tip above the middle-finger MCP is up.
            return if hand[index::THUMB_TIP].y < hand[index::MIDDLE_MCP].y {
                Gesture::ThumbsUp
            } else {
                Gesture::ThumbsDown
            };
        }
        _ => {}
    }

    let d = hand[index::THUMB_TIP].distance(&hand[index::INDEX_TIP]);
    if d < PINCH_MAX_DIST {
        Gesture::Pinch
    } else {
        Gesture::Unknown
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
