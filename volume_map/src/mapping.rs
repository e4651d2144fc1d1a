//! Distance → percent → native volume scaling.

use std::fmt;

/// Volume as a percentage, always within `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct VolumeLevel(f64);

impl VolumeLevel {
    pub const SILENT: VolumeLevel = VolumeLevel(0.0);
    pub const FULL:   VolumeLevel = VolumeLevel(100.0);

    /// Clamp `percent` into range.  NaN reads as silence.
    pub fn new(percent: f64) -> Self {
        if percent.is_nan() {
            return VolumeLevel::SILENT;
        }
        VolumeLevel(percent.clamp(0.0, 100.0))
    }

    pub fn percent(self) -> f64 { self.0 }

    /// Whole percent, truncated, for display.
    pub fn whole(self) -> u8 { self.0 as u8 }
}

impl fmt::Display for VolumeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// DistanceMap
// ════════════════════════════════════════════════════════════════════════════

/// Linear map from a fingertip distance span onto `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceMap {
    /// Distance (px) at and below which volume is 0.  Hand almost closed.
    pub min_distance: f64,
    /// Distance (px) at and above which volume is 100.  Hand fully open.
    pub max_distance: f64,
}

impl Default for DistanceMap {
    fn default() -> Self {
        DistanceMap { min_distance: 80.0, max_distance: 250.0 }
    }
}

impl DistanceMap {
    /// `None` unless `min < max`.
    pub fn new(min_distance: f64, max_distance: f64) -> Option<Self> {
        (min_distance < max_distance).then_some(DistanceMap { min_distance, max_distance })
    }

    pub fn volume_for(&self, distance: f64) -> VolumeLevel {
        let span = self.max_distance - self.min_distance;
        VolumeLevel::new((distance - self.min_distance) / span * 100.0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// NativeRange
// ════════════════════════════════════════════════════════════════════════════

/// The `(min, max)` a mixer accepts, in its own units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NativeRange {
    pub min: f32,
    pub max: f32,
}

impl NativeRange {
    pub fn new(min: f32, max: f32) -> Self {
        NativeRange { min, max }
    }

    /// `percent / 100 * (max - min) + min`.
    pub fn scale(&self, level: VolumeLevel) -> f32 {
        (level.percent() / 100.0) as f32 * (self.max - self.min) + self.min
    }

    /// Clamp a native value into the range.
    pub fn clamp(&self, native: f32) -> f32 {
        native.clamp(self.min, self.max)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
