//! # pinch_volume
//!
//! Set the system volume by pinching: the distance between thumb tip and
//! index fingertip, as seen by the camera, becomes the master volume.
//!
//! ## Per-frame pipeline
//!
//! | Step | What happens |
//! |---|---|
//! | capture | read one frame; a failed read ends the program |
//! | detect | ask the hand detector for hand 0; no hand → show the raw frame |
//! | measure | pixel distance between landmark 4 (thumb tip) and 8 (index tip) |
//! | map | 80 px → 0 %, 250 px → 100 %, clamped |
//! | apply | mixer rescales the percentage into its native range |
//! | render | `Distance:` / `Volume:` readout drawn on the frame, frame shown |
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: the pointer is the hand.
//! * `leap` — **Hardware mode**: fingertips come from a LeapMotion controller.
//!
//! ### Simulation controls
//!
//! | Input | Effect |
//! |---|---|
//! | Move pointer over window | Hand appears centred on the pointer |
//! | Pointer leaves window | No hand in frame |
//! | `Up` / scroll up | Open the pinch |
//! | `Down` / scroll down | Close the pinch |
//! | `X` | Quit |

pub mod error;
pub mod frame;
pub mod camera;
pub mod overlay;
pub mod viewer;
pub mod pipeline;
pub mod app;
#[cfg(feature = "leap")]
pub mod leap;
