//! Landmark acquisition — window-driven simulation and LeapMotion hardware.
//!
//! The public interface is [`FrameEvent`] delivered over a bounded
//! channel. Consumers don't need to know whether frames came from a real
//! tracker or the simulator, and the channel holds exactly one frame:
//! while the pipeline is still dispatching frame N, frame N+1 is dropped
//! at the producer, so processing never falls behind the camera.

use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TryRecvError, TrySendError};
use std::thread;
use std::time::Duration;

use hand_track::{synth, HandFrame};

// ════════════════════════════════════════════════════════════════════════════
// FrameEvent
// ════════════════════════════════════════════════════════════════════════════

/// One detector observation: zero or more tracked hands, in detector
/// order. The pipeline uses the first hand only.
#[derive(Clone, Debug, Default)]
pub struct FrameEvent {
    pub hands: Vec<HandFrame>,
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSource trait — unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`FrameEvent`]s over a channel.
pub trait LandmarkSource: Send + 'static {
    fn run(self: Box<Self>, tx: SyncSender<FrameEvent>);
}

// ════════════════════════════════════════════════════════════════════════════
// Spawn helper
// ════════════════════════════════════════════════════════════════════════════

/// Spawn a landmark source on its own thread and return the receiving end.
pub fn spawn_landmark_source<S: LandmarkSource>(source: S) -> Receiver<FrameEvent> {
    let (tx, rx) = sync_channel(1);
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// SimLandmarkSource — window mouse + keys (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Hand pose the simulator should synthesize.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimPose {
    Point,
    Peace,
    OpenHand,
    Fist,
    ThumbsUp,
    ThumbsDown,
    Pinch,
    Unknown,
}

/// Raw input event from the status window.
#[derive(Clone, Copy, Debug)]
pub enum SimInput {
    /// Select the synthesized hand pose.
    Pose(SimPose),
    /// Index fingertip in normalized camera coordinates.
    TipAt(f32, f32),
    /// Remove the hand from view.
    HandOff,
}

/// Landmark source driven by [`SimInput`] events from the status window.
///
/// Holds the most recent pose and fingertip position and synthesizes a
/// frame from them at camera rate, so gesture hold times behave exactly
/// as they would with a live detector.
pub struct SimLandmarkSource {
    pub rx: std::sync::mpsc::Receiver<SimInput>,
}

const SIM_FRAME_INTERVAL: Duration = Duration::from_millis(33); // ~30 fps

impl LandmarkSource for SimLandmarkSource {
    fn run(self: Box<Self>, tx: SyncSender<FrameEvent>) {
        let mut pose: Option<SimPose> = None;
        let mut tip = (0.5f32, 0.5f32);

        loop {
            loop {
                match self.rx.try_recv() {
                    Ok(SimInput::Pose(p)) => pose = Some(p),
                    Ok(SimInput::TipAt(x, y)) => tip = (x, y),
                    Ok(SimInput::HandOff) => pose = None,
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => return,
                }
            }

            let hands = match pose {
                Some(p) => vec![synth_pose(p, tip.0, tip.1)],
                None => Vec::new(),
            };
            // A full mailbox means the pipeline is mid-dispatch: drop the
            // frame rather than queue it.
            match tx.try_send(FrameEvent { hands }) {
                Ok(()) | Err(TrySendError::Full(_)) => {}
                Err(TrySendError::Disconnected(_)) => return,
            }

            thread::sleep(SIM_FRAME_INTERVAL);
        }
    }
}

/// Synthesize the frame for one simulated pose, index fingertip at `(x, y)`.
pub fn synth_pose(pose: SimPose, x: f32, y: f32) -> HandFrame {
    match pose {
        SimPose::Point => synth::point_at(x, y),
        SimPose::Peace => synth::peace_at(x, y),
        SimPose::OpenHand => synth::open_hand_at(x, y),
        SimPose::Fist => synth::fist_at(x, y),
        SimPose::ThumbsUp => synth::thumbs_up_at(x, y),
        SimPose::ThumbsDown => synth::thumbs_down_at(x, y),
        SimPose::Pinch => synth::pinch_at(x, y),
        SimPose::Unknown => synth::unknown_at(x, y),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LeapLandmarkSource — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Landmark source backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library.
///
/// Each tracking frame, every visible hand's digit joints are projected
/// onto the 21-point topology and normalized into the unit square using
/// the interaction volume above the device (y up in LeapC, y down in the
/// camera-frame convention, hence the flip).
#[cfg(feature = "leap")]
pub struct LeapLandmarkSource;

#[cfg(feature = "leap")]
impl LandmarkSource for LeapLandmarkSource {
    fn run(self: Box<Self>, tx: SyncSender<FrameEvent>) {
        use leaprs::*;

        let mut connection = Connection::create(ConnectionConfig::default())
            .expect("Failed to open LeapC connection");
        connection.open().expect("Failed to open LeapMotion device");

        loop {
            let msg = match connection.poll(100) {
                Ok(m) => m,
                Err(_) => continue,
            };

            if let Event::Tracking(frame) = msg.event() {
                let hands: Vec<HandFrame> =
                    frame.hands().map(|h| leap_hand_frame(&h)).collect();
                match tx.try_send(FrameEvent { hands }) {
                    Ok(()) | Err(TrySendError::Full(_)) => {}
                    Err(TrySendError::Disconnected(_)) => return,
                }
            }
        }
    }
}

/// Interaction volume (mm) mapped onto the unit square.
#[cfg(feature = "leap")]
const LEAP_SPAN_X: f32 = 400.0;
#[cfg(feature = "leap")]
const LEAP_BASE_Y: f32 = 80.0;
#[cfg(feature = "leap")]
const LEAP_SPAN_Y: f32 = 320.0;

#[cfg(feature = "leap")]
fn leap_hand_frame(hand: &leaprs::Hand) -> HandFrame {
    use hand_track::{Landmark, LANDMARK_COUNT};

    let norm = |x: f32, y: f32| {
        Landmark::new(
            ((x + LEAP_SPAN_X / 2.0) / LEAP_SPAN_X).clamp(0.0, 1.0),
            (1.0 - (y - LEAP_BASE_Y) / LEAP_SPAN_Y).clamp(0.0, 1.0),
        )
    };

    let mut pts = [Landmark::default(); LANDMARK_COUNT];
    let palm = hand.palm().position();
    pts[hand_track::index::WRIST] = norm(palm.x, palm.y - 60.0);

    for (d, digit) in hand.digits().enumerate().take(5) {
        let joints = [
            digit.metacarpal().next_joint(),
            digit.proximal().next_joint(),
            digit.intermediate().next_joint(),
            digit.distal().next_joint(),
        ];
        for (j, joint) in joints.into_iter().enumerate() {
            pts[1 + d * 4 + j] = norm(joint.x, joint.y);
        }
    }

    HandFrame::new(pts)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_gesture::{classify, Gesture};

    #[test]
    fn every_sim_pose_classifies_to_its_gesture() {
        let cases = [
            (SimPose::Point, Gesture::Point),
            (SimPose::Peace, Gesture::Peace),
            (SimPose::OpenHand, Gesture::OpenHand),
            (SimPose::Fist, Gesture::Fist),
            (SimPose::ThumbsUp, Gesture::ThumbsUp),
            (SimPose::ThumbsDown, Gesture::ThumbsDown),
            (SimPose::Pinch, Gesture::Pinch),
            (SimPose::Unknown, Gesture::Unknown),
        ];
        for (pose, expected) in cases {
            let frame = synth_pose(pose, 0.5, 0.45);
            assert_eq!(classify(&frame), expected, "pose {:?}", pose);
        }
    }

    #[test]
    fn sim_source_delivers_frames_and_hand_off() {
        let (in_tx, in_rx) = std::sync::mpsc::channel();
        let frame_rx = spawn_landmark_source(SimLandmarkSource { rx: in_rx });

        in_tx.send(SimInput::Pose(SimPose::Point)).unwrap();
        in_tx.send(SimInput::TipAt(0.3, 0.6)).unwrap();
        let with_hand = frame_rx
            .iter()
            .find(|ev| !ev.hands.is_empty())
            .expect("source stopped before delivering a hand");
        assert_eq!(classify(&with_hand.hands[0]), Gesture::Point);

        in_tx.send(SimInput::HandOff).unwrap();
        let empty = frame_rx
            .iter()
            .find(|ev| ev.hands.is_empty())
            .expect("source stopped before hand-off");
        assert!(empty.hands.is_empty());
    }
}
