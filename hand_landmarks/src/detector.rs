//! The hand detector capability.
//!
//! Consumers only see [`HandDetector`]; whether landmarks came from a model,
//! a LeapMotion controller, or the pointer-driven simulator is invisible to
//! them.

use thiserror::Error;

use crate::landmark::LandmarkSet;

/// A backend failed to produce a result for this frame.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("hand tracking backend unavailable: {0}")]
    Unavailable(String),

    #[error("hand tracking backend failed: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, DetectError>;

/// Borrowed view of an ARGB image handed to a detector.
#[derive(Clone, Copy, Debug)]
pub struct ImageView<'a> {
    pub pixels: &'a [u32],
    pub width:  u32,
    pub height: u32,
}

// ════════════════════════════════════════════════════════════════════════════
// DetectorConfig
// ════════════════════════════════════════════════════════════════════════════

/// Selection rules applied to whatever hands a backend reports.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectorConfig {
    /// Keep at most this many hands, in backend order.
    pub max_num_hands: usize,
    /// Hands scoring below this are discarded.
    pub min_detection_confidence: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            max_num_hands:            1,
            min_detection_confidence: 0.5,
        }
    }
}

impl DetectorConfig {
    /// Filter `hands` and return the one at `hand_index`, or an empty set.
    pub fn select(&self, hands: Vec<LandmarkSet>, hand_index: usize) -> LandmarkSet {
        hands
            .into_iter()
            .filter(|h| !h.is_empty() && h.score() >= self.min_detection_confidence)
            .take(self.max_num_hands)
            .nth(hand_index)
            .unwrap_or_default()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandDetector trait
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can find hands in an image.
pub trait HandDetector {
    /// Every hand visible in `image`, in backend order.
    fn find_hands(&mut self, image: ImageView<'_>) -> Result<Vec<LandmarkSet>>;

    fn config(&self) -> &DetectorConfig;

    /// Landmarks of hand `hand_index` after config filtering.
    ///
    /// Empty when no (qualifying) hand is present.
    fn find_hand_landmarks(
        &mut self,
        image:      ImageView<'_>,
        hand_index: usize,
    ) -> Result<LandmarkSet> {
        let hands = self.find_hands(image)?;
        Ok(self.config().select(hands, hand_index))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
