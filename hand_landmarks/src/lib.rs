//! # hand_landmarks
//!
//! Per-frame hand landmark data and the detector capability that produces it.
//!
//! A detector looks at one image and reports zero or more hands, each as a
//! [`LandmarkSet`] of 21 keypoints laid out in the MediaPipe hand topology
//! (see [`topology`]).  Landmarks are in **pixel** coordinates of the image
//! they were detected in and live for exactly one frame.
//!
//! ```text
//!            8   12  16  20        ← fingertips
//!            |   |   |   |
//!    4       7   11  15  19
//!     \      |   |   |   |
//!      3     6   10  14  18
//!       \    |   |   |   |
//!        2   5 - 9 - 13- 17
//!         \  |          /
//!          1 |        /
//!           \|      /
//!            0 ───             ← wrist
//! ```
//!
//! ## Backends
//!
//! * [`sim::SimHandDetector`] — a synthetic hand driven by pointer input.
//!   Always available; no camera or model required.
//! * Hardware detectors live in the application crate behind feature flags
//!   and implement [`HandDetector`] the same way.

pub mod landmark;
pub mod topology;
pub mod detector;
pub mod sim;

pub use landmark::{distance, Landmark, LandmarkError, LandmarkSet};
pub use detector::{DetectError, DetectorConfig, HandDetector, ImageView};
pub use sim::{SimHandDetector, SimInput};
