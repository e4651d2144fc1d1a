//! Simulated hand detector driven by pointer input.
//!
//! The display window forwards [`SimInput`] events over a channel.  The
//! detector drains them each frame and synthesises one 21-point hand whose
//! thumb tip and index fingertip straddle the pointer, `spread` pixels apart.
//! Moving the pointer outside the window makes the hand disappear.

use std::sync::mpsc::{Receiver, TryRecvError};

use crate::detector::{DetectorConfig, HandDetector, ImageView, Result};
use crate::landmark::{Landmark, LandmarkSet};
use crate::topology::LANDMARK_COUNT;

/// Spread the simulated hand starts with; maps to half volume.
pub const DEFAULT_SPREAD: i32 = 165;
/// Widest pinch the simulated hand can make.
pub const MAX_SPREAD:     i32 = 400;

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Pointer is over the frame at this pixel.
    PointerMoved { x: f32, y: f32 },
    /// Pointer left the frame: no hand in view.
    PointerLeft,
    /// Open (`> 0`) or close (`< 0`) the pinch by this many pixels.
    Widen(i32),
}

pub struct SimHandDetector {
    rx:      Receiver<SimInput>,
    pointer: Option<(i32, i32)>,
    spread:  i32,
    config:  DetectorConfig,
}

impl SimHandDetector {
    pub fn new(rx: Receiver<SimInput>, config: DetectorConfig) -> Self {
        SimHandDetector {
            rx,
            pointer: None,
            spread:  DEFAULT_SPREAD,
            config,
        }
    }

    pub fn spread(&self) -> i32 { self.spread }

    fn drain_input(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(SimInput::PointerMoved { x, y }) => {
                    self.pointer = Some((x as i32, y as i32));
                }
                Ok(SimInput::PointerLeft) => self.pointer = None,
                Ok(SimInput::Widen(delta)) => {
                    self.spread = (self.spread + delta).clamp(0, MAX_SPREAD);
                }
                Err(TryRecvError::Empty)        => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }
    }
}

impl HandDetector for SimHandDetector {
    fn find_hands(&mut self, _image: ImageView<'_>) -> Result<Vec<LandmarkSet>> {
        self.drain_input();
        Ok(match self.pointer {
            Some((cx, cy)) => vec![synthetic_hand(cx, cy, self.spread)],
            None           => Vec::new(),
        })
    }

    fn config(&self) -> &DetectorConfig { &self.config }
}

/// Build a plausible right hand, palm toward the camera, with the thumb tip
/// and index fingertip on the row `cy`, exactly `spread` pixels apart and
/// centred on `cx`.
pub fn synthetic_hand(cx: i32, cy: i32, spread: i32) -> LandmarkSet {
    let thumb_tip = (cx - spread / 2, cy);
    let index_tip = (thumb_tip.0 + spread, cy);
    let wrist     = (cx, cy + 180);

    let lerp = |a: (i32, i32), b: (i32, i32), t: f32, bow: i32| -> (i32, i32) {
        (
            a.0 + ((b.0 - a.0) as f32 * t) as i32 + bow,
            a.1 + ((b.1 - a.1) as f32 * t) as i32,
        )
    };

    let index_mcp = (cx + 25, cy + 90);
    let straight = |base: (i32, i32), lengths: [i32; 3]| -> [(i32, i32); 4] {
        [
            base,
            (base.0, base.1 - lengths[0]),
            (base.0, base.1 - lengths[1]),
            (base.0, base.1 - lengths[2]),
        ]
    };

    let mut points: Vec<(i32, i32)> = Vec::with_capacity(LANDMARK_COUNT);
    points.push(wrist);
    // thumb bows outward away from the palm
    points.push(lerp(wrist, thumb_tip, 0.25, -15));
    points.push(lerp(wrist, thumb_tip, 0.50, -20));
    points.push(lerp(wrist, thumb_tip, 0.75, -10));
    points.push(thumb_tip);
    points.push(index_mcp);
    points.push(lerp(index_mcp, index_tip, 1.0 / 3.0, 0));
    points.push(lerp(index_mcp, index_tip, 2.0 / 3.0, 0));
    points.push(index_tip);
    points.extend(straight((cx + 45, cy + 85),  [40, 75, 105]));
    points.extend(straight((cx + 62, cy + 95),  [35, 65, 90]));
    points.extend(straight((cx + 76, cy + 110), [28, 50, 70]));

    let landmarks = points
        .into_iter()
        .enumerate()
        .map(|(id, (x, y))| Landmark::new(id as u8, x, y))
        .collect();
    LandmarkSet::new(landmarks, 1.0)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
