//! Landmarks, landmark sets, and the fingertip distance.

use thiserror::Error;

use crate::topology::{INDEX_FINGER_TIP, THUMB_TIP};

// ════════════════════════════════════════════════════════════════════════════
// Landmark
// ════════════════════════════════════════════════════════════════════════════

/// One detected keypoint: topology id plus pixel position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Landmark {
    pub id: u8,
    pub x:  i32,
    pub y:  i32,
}

impl Landmark {
    pub fn new(id: u8, x: i32, y: i32) -> Self {
        Landmark { id, x, y }
    }

    /// Build a landmark from coordinates normalised to `[0, 1]` of the image.
    ///
    /// Pixels are truncated toward zero, so a landmark at `0.999` of a
    /// 640-wide image lands on column 639.
    pub fn from_normalized(id: u8, nx: f32, ny: f32, width: u32, height: u32) -> Self {
        Landmark {
            id,
            x: (nx * width as f32) as i32,
            y: (ny * height as f32) as i32,
        }
    }

    pub fn point(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

/// Euclidean pixel distance between two points.
pub fn distance(p1: (i32, i32), p2: (i32, i32)) -> f64 {
    let dx = (p2.0 - p1.0) as f64;
    let dy = (p2.1 - p1.1) as f64;
    (dx * dx + dy * dy).sqrt()
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSet
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LandmarkError {
    #[error("landmark {id} missing from a set of {len} landmarks")]
    Missing { id: u8, len: usize },
}

/// All landmarks of one hand in one frame, in detector order.
///
/// An empty set means "no hand" and is a normal outcome.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LandmarkSet {
    landmarks: Vec<Landmark>,
    /// Detector confidence in `[0, 1]`.
    score: f32,
}

impl LandmarkSet {
    pub fn new(landmarks: Vec<Landmark>, score: f32) -> Self {
        LandmarkSet { landmarks, score: score.clamp(0.0, 1.0) }
    }

    pub fn empty() -> Self {
        LandmarkSet::default()
    }

    pub fn is_empty(&self) -> bool { self.landmarks.is_empty() }
    pub fn len(&self)      -> usize { self.landmarks.len() }
    pub fn score(&self)    -> f32  { self.score }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.landmarks.iter()
    }

    /// Look up a landmark by topology id.
    pub fn get(&self, id: u8) -> Option<&Landmark> {
        // Detectors emit ids in order, so the id is usually also the index.
        match self.landmarks.get(id as usize) {
            Some(lm) if lm.id == id => Some(lm),
            _ => self.landmarks.iter().find(|lm| lm.id == id),
        }
    }

    /// Pixel position of landmark `id`, or an error naming the missing id.
    pub fn point(&self, id: u8) -> Result<(i32, i32), LandmarkError> {
        self.get(id)
            .map(Landmark::point)
            .ok_or(LandmarkError::Missing { id, len: self.landmarks.len() })
    }

    /// Distance between the thumb tip and the index fingertip.
    pub fn fingertip_distance(&self) -> Result<f64, LandmarkError> {
        let thumb = self.point(THUMB_TIP)?;
        let index = self.point(INDEX_FINGER_TIP)?;
        Ok(distance(thumb, index))
    }
}

impl<'a> IntoIterator for &'a LandmarkSet {
    type Item = &'a Landmark;
    type IntoIter = std::slice::Iter<'a, Landmark>;

    fn into_iter(self) -> Self::IntoIter {
        self.landmarks.iter()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
