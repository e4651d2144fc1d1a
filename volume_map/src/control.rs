//! The volume control capability and its in-process backends.

use std::io;
use std::process::ExitStatus;

use log::{debug, info};
use thiserror::Error;

use crate::mapping::{NativeRange, VolumeLevel};

#[derive(Debug, Error)]
pub enum VolumeError {
    #[error("failed to run {program}: {source}")]
    Command {
        program: &'static str,
        #[source]
        source:  io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    CommandFailed {
        program: &'static str,
        status:  ExitStatus,
        stderr:  String,
    },

    #[error("no volume limits reported for mixer control '{0}'")]
    RangeParse(String),

    #[error("mixer reports an empty volume range [{min}, {max}]")]
    EmptyRange { min: f32, max: f32 },
}

pub type Result<T> = std::result::Result<T, VolumeError>;

// ════════════════════════════════════════════════════════════════════════════
// VolumeControl trait
// ════════════════════════════════════════════════════════════════════════════

/// A mixer that can be set anywhere in its native range.
pub trait VolumeControl {
    /// The span `set_native` accepts.
    fn range(&self) -> NativeRange;

    /// Set the master level in native units.
    fn set_native(&mut self, level: f32) -> Result<()>;

    /// Scale `level` into the native range and apply it.
    ///
    /// Returns the native value that was set.
    fn set_volume(&mut self, level: VolumeLevel) -> Result<f32> {
        let native = self.range().scale(level);
        self.set_native(native)?;
        Ok(native)
    }
}

impl<V: VolumeControl + ?Sized> VolumeControl for Box<V> {
    fn range(&self) -> NativeRange { (**self).range() }
    fn set_native(&mut self, level: f32) -> Result<()> { (**self).set_native(level) }
}

// ── simulated mixer ──────────────────────────────────────────────────────

/// In-memory mixer with a decibel range like a typical speaker endpoint.
#[derive(Debug)]
pub struct SimMixer {
    range:   NativeRange,
    current: f32,
    changes: usize,
}

impl Default for SimMixer {
    fn default() -> Self {
        SimMixer::new(NativeRange::new(-65.25, 0.0))
    }
}

impl SimMixer {
    pub fn new(range: NativeRange) -> Self {
        SimMixer { range, current: range.max, changes: 0 }
    }

    /// Last level set, in native units.
    pub fn level(&self) -> f32 { self.current }

    /// Number of `set_native` calls so far.
    pub fn changes(&self) -> usize { self.changes }
}

impl VolumeControl for SimMixer {
    fn range(&self) -> NativeRange { self.range }

    fn set_native(&mut self, level: f32) -> Result<()> {
        let level = self.range.clamp(level);
        if (level - self.current).abs() > f32::EPSILON {
            debug!("sim mixer: {:.2} -> {:.2}", self.current, level);
        }
        self.current = level;
        self.changes += 1;
        Ok(())
    }
}

impl Drop for SimMixer {
    fn drop(&mut self) {
        info!("sim mixer released after {} changes (final level {:.2})", self.changes, self.current);
    }
}

// ── null mixer ───────────────────────────────────────────────────────────

/// Accepts everything, does nothing.
#[derive(Debug, Default)]
pub struct NullMixer;

impl VolumeControl for NullMixer {
    fn range(&self) -> NativeRange { NativeRange::new(0.0, 100.0) }
    fn set_native(&mut self, _level: f32) -> Result<()> { Ok(()) }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
