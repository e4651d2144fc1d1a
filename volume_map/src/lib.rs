//! # volume_map
//!
//! Turns a fingertip distance into a system volume.
//!
//! Two linear maps are chained:
//!
//! ```text
//!   distance (px)        percent            native units
//!   [80 ──── 250]  ──▶  [0 ── 100]  ──▶  [min ──── max]
//!     DistanceMap        VolumeLevel       NativeRange
//! ```
//!
//! The first map saturates: pinches tighter than the lower bound read as
//! silence, wider than the upper bound as full volume.  The second is done by
//! the mixer backend, whose range is whatever the platform reports (decibels
//! on a Windows endpoint, raw steps for ALSA).
//!
//! ## Backends
//!
//! | Type | Range | Notes |
//! |---|---|---|
//! | [`SimMixer`] | −65.25 … 0.0 dB | in-memory, logs every change |
//! | [`NullMixer`] | 0 … 100 | discards everything |
//! | [`AmixerControl`] | from `amixer sget` | shells out to ALSA `amixer` |

pub mod mapping;
pub mod control;
pub mod amixer;

pub use mapping::{DistanceMap, NativeRange, VolumeLevel};
pub use control::{NullMixer, SimMixer, VolumeControl, VolumeError};
pub use amixer::{AmixerControl, MixerCommand, SystemAmixer};
