//! Synthetic hand-shape builders.
//!
//! Each builder produces a plausible 21-point frame for one pose, with the
//! index fingertip anchored exactly at the given normalized position —
//! that is the point cursor mapping reads, so the simulator can pin it to
//! the mouse. Proportions are loose; only the relations the extractor and
//! classifier test (tip vs. joint ordering, tip distances) are guaranteed.

use crate::{index, HandFrame, Landmark, LANDMARK_COUNT};

/// Horizontal offsets of the index..pinky columns from the palm centre.
const FINGER_COL: [f32; 4] = [-0.045, -0.015, 0.015, 0.045];
const EXTENDED_TIP_DY: f32 = -0.11;
const FOLDED_TIP_DY: f32 = 0.02;

#[derive(Clone, Copy)]
enum ThumbPose {
    Folded,
    /// Extended sideways, tip roughly level with the palm.
    Side,
    /// Extended with the tip well above the palm line.
    Up,
    /// Extended with the tip well below the palm line.
    Down,
    /// Extended far out, clear of the index column.
    Spread,
    /// Curled in next to the index fingertip.
    Pinch { tx: f32, ty: f32 },
}

fn scaffold(cx: f32, cy: f32) -> [Landmark; LANDMARK_COUNT] {
    let mut pts = [Landmark::default(); LANDMARK_COUNT];
    pts[index::WRIST] = Landmark::new(cx, cy + 0.18);
    pts
}

fn set_finger(pts: &mut [Landmark; LANDMARK_COUNT], f: usize, cx: f32, cy: f32, extended: bool) {
    let fx = cx + FINGER_COL[f - 1];
    pts[index::MCPS[f]] = Landmark::new(fx, cy);
    if extended {
        pts[index::PIPS[f]] = Landmark::new(fx, cy - 0.05);
        pts[index::PIPS[f] + 1] = Landmark::new(fx, cy - 0.08);
        pts[index::TIPS[f]] = Landmark::new(fx, cy + EXTENDED_TIP_DY);
    } else {
        pts[index::PIPS[f]] = Landmark::new(fx, cy - 0.04);
        pts[index::PIPS[f] + 1] = Landmark::new(fx, cy - 0.01);
        pts[index::TIPS[f]] = Landmark::new(fx, cy + FOLDED_TIP_DY);
    }
}

fn set_thumb(pts: &mut [Landmark; LANDMARK_COUNT], cx: f32, cy: f32, pose: ThumbPose) {
    let chain: [(f32, f32); 4] = match pose {
        ThumbPose::Folded => [
            (cx - 0.05, cy + 0.10),
            (cx - 0.06, cy + 0.06),
            (cx - 0.09, cy + 0.03),
            (cx - 0.07, cy + 0.03),
        ],
        ThumbPose::Side => [
            (cx - 0.05, cy + 0.10),
            (cx - 0.07, cy + 0.06),
            (cx - 0.09, cy + 0.02),
            (cx - 0.12, cy - 0.01),
        ],
        ThumbPose::Up => [
            (cx - 0.05, cy + 0.08),
            (cx - 0.07, cy + 0.03),
            (cx - 0.09, cy - 0.02),
            (cx - 0.12, cy - 0.06),
        ],
        ThumbPose::Down => [
            (cx - 0.05, cy + 0.04),
            (cx - 0.07, cy + 0.07),
            (cx - 0.09, cy + 0.10),
            (cx - 0.12, cy + 0.14),
        ],
        ThumbPose::Spread => [
            (cx - 0.06, cy + 0.10),
            (cx - 0.10, cy + 0.08),
            (cx - 0.13, cy + 0.06),
            (cx - 0.17, cy + 0.05),
        ],
        ThumbPose::Pinch { tx, ty } => [
            (tx + 0.05, ty + 0.13),
            (tx + 0.04, ty + 0.09),
            (tx + 0.02, ty + 0.05),
            (tx - 0.02, ty + 0.02),
        ],
    };
    for (i, (x, y)) in chain.into_iter().enumerate() {
        pts[1 + i] = Landmark::new(x, y);
    }
}

/// Palm centre for a frame whose index fingertip must land at `(x, y)`.
fn anchor(x: f32, y: f32, index_extended: bool) -> (f32, f32) {
    let dy = if index_extended { EXTENDED_TIP_DY } else { FOLDED_TIP_DY };
    (x - FINGER_COL[0], y - dy)
}

fn build(x: f32, y: f32, fingers: [bool; 4], thumb: ThumbPose) -> HandFrame {
    let (cx, cy) = anchor(x, y, fingers[0]);
    let mut pts = scaffold(cx, cy);
    for (i, &extended) in fingers.iter().enumerate() {
        set_finger(&mut pts, i + 1, cx, cy, extended);
    }
    set_thumb(&mut pts, cx, cy, thumb);
    HandFrame::new(pts)
}

/// Only the index finger extended.
pub fn point_at(x: f32, y: f32) -> HandFrame {
    build(x, y, [true, false, false, false], ThumbPose::Folded)
}

/// Index and middle extended.
pub fn peace_at(x: f32, y: f32) -> HandFrame {
    build(x, y, [true, true, false, false], ThumbPose::Folded)
}

/// All five digits extended.
pub fn open_hand_at(x: f32, y: f32) -> HandFrame {
    build(x, y, [true, true, true, true], ThumbPose::Side)
}

/// Every digit folded.
pub fn fist_at(x: f32, y: f32) -> HandFrame {
    build(x, y, [false, false, false, false], ThumbPose::Folded)
}

/// Thumb extended upward, fingers folded.
pub fn thumbs_up_at(x: f32, y: f32) -> HandFrame {
    build(x, y, [false, false, false, false], ThumbPose::Up)
}

/// Thumb extended downward, fingers folded.
pub fn thumbs_down_at(x: f32, y: f32) -> HandFrame {
    build(x, y, [false, false, false, false], ThumbPose::Down)
}

/// Thumb tip curled in next to the extended index fingertip.
pub fn pinch_at(x: f32, y: f32) -> HandFrame {
    build(x, y, [true, false, false, false], ThumbPose::Pinch { tx: x, ty: y })
}

/// Ring and pinky extended with the thumb spread wide — matches no
/// recognized pose and keeps the thumb clear of the index fingertip.
pub fn unknown_at(x: f32, y: f32) -> HandFrame {
    build(x, y, [false, false, true, true], ThumbPose::Spread)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finger_states;

    #[test]
    fn pinch_tips_are_close() {
        let frame = pinch_at(0.5, 0.5);
        let d = frame[index::THUMB_TIP].distance(&frame[index::INDEX_TIP]);
        assert!(d < 0.05, "pinch tip distance {} not under threshold", d);
    }

    #[test]
    fn unknown_tips_are_apart() {
        let frame = unknown_at(0.5, 0.5);
        let d = frame[index::THUMB_TIP].distance(&frame[index::INDEX_TIP]);
        assert!(d >= 0.05, "unknown pose accidentally pinches ({})", d);
    }

    #[test]
    fn thumbs_up_tip_above_middle_mcp() {
        let frame = thumbs_up_at(0.5, 0.5);
        assert!(frame[index::THUMB_TIP].y < frame[index::MIDDLE_MCP].y);
    }

    #[test]
    fn thumbs_down_tip_below_middle_mcp() {
        let frame = thumbs_down_at(0.5, 0.5);
        assert!(frame[index::THUMB_TIP].y > frame[index::MIDDLE_MCP].y);
    }

    #[test]
    fn unknown_pose_vector_matches_no_named_shape() {
        let v = finger_states(&unknown_at(0.5, 0.5)).as_array();
        assert_eq!(v, [true, false, false, true, true]);
    }
}
