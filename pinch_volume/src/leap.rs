//! Hand landmarks from a LeapMotion controller (feature = "leap").
//!
//! LeapC reports joints in millimetres above the device.  Each joint is
//! projected into the frame by dropping depth and normalising the
//! interaction box below, so the readout behaves like a camera looking down
//! at the hand from above the controller.
//!
//! Landmark layout follows the MediaPipe topology: 0 is the palm centre,
//! then four joints per digit thumb → pinky (end of metacarpal, proximal,
//! intermediate, distal).

use leaprs::*;
use log::info;

use hand_landmarks::topology::WRIST;
use hand_landmarks::{
    DetectError, DetectorConfig, HandDetector, ImageView, Landmark, LandmarkSet,
};

/// Interaction box in mm: x ∈ [-X_HALF, X_HALF], y ∈ [Y_MIN, Y_MIN + Y_SPAN].
const X_HALF: f32 = 200.0;
const Y_MIN:  f32 = 80.0;
const Y_SPAN: f32 = 320.0;

/// Messages polled per frame while waiting for a tracking event.
const POLLS_PER_FRAME: usize = 8;
const POLL_TIMEOUT_MS: u32   = 5;

pub struct LeapHandDetector {
    connection: Connection,
    config:     DetectorConfig,
}

impl LeapHandDetector {
    pub fn open(config: DetectorConfig) -> Result<Self, DetectError> {
        let mut connection = Connection::create(ConnectionConfig::default())
            .map_err(|e| DetectError::Unavailable(format!("LeapC connection: {:?}", e)))?;
        connection
            .open()
            .map_err(|e| DetectError::Unavailable(format!("LeapMotion device: {:?}", e)))?;
        info!("LeapMotion connection open");
        Ok(LeapHandDetector { connection, config })
    }
}

impl HandDetector for LeapHandDetector {
    fn find_hands(&mut self, image: ImageView<'_>) -> Result<Vec<LandmarkSet>, DetectError> {
        for _ in 0..POLLS_PER_FRAME {
            let msg = match self.connection.poll(POLL_TIMEOUT_MS) {
                Ok(m)  => m,
                Err(_) => continue,
            };
            if let Event::Tracking(frame) = msg.event() {
                return Ok(frame
                    .hands()
                    .map(|hand| to_landmark_set(&hand, image.width, image.height))
                    .collect());
            }
        }
        Ok(Vec::new())
    }

    fn config(&self) -> &DetectorConfig { &self.config }
}

fn to_landmark_set(hand: &Hand, width: u32, height: u32) -> LandmarkSet {
    let project = |id: u8, x: f32, y: f32| {
        let nx = ((x + X_HALF) / (2.0 * X_HALF)).clamp(0.0, 1.0);
        let ny = (1.0 - (y - Y_MIN) / Y_SPAN).clamp(0.0, 1.0);
        Landmark::from_normalized(id, nx, ny, width, height)
    };

    let palm = hand.palm().position();
    let mut landmarks = vec![project(WRIST, palm.x, palm.y)];

    for digit in hand.digits() {
        for joint in [
            digit.metacarpal().next_joint(),
            digit.proximal().next_joint(),
            digit.intermediate().next_joint(),
            digit.distal().next_joint(),
        ] {
            let id = landmarks.len() as u8;
            landmarks.push(project(id, joint.x, joint.y));
        }
    }

    LandmarkSet::new(landmarks, 1.0)
}
