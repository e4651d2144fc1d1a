//! ALSA mixer backend driven through the `amixer` command.
//!
//! `amixer sget Master` prints something like
//!
//! ```text
//! Simple mixer control 'Master',0
//!   Capabilities: pvolume pswitch pswitch-joined
//!   Playback channels: Front Left - Front Right
//!   Limits: Playback 0 - 87
//!   Front Left: Playback 52 [60%] [-26.25dB] [on]
//! ```
//!
//! and the `Limits:` line is the native range.  Levels are written back as
//! raw step values with `amixer -q sset Master <raw>`.

use std::process::Command;

use log::{debug, info};

use crate::control::{Result, VolumeControl, VolumeError};
use crate::mapping::NativeRange;

const PROGRAM: &str = "amixer";

/// Runs one `amixer` invocation and returns its stdout.
pub trait MixerCommand {
    fn run(&mut self, args: &[&str]) -> Result<String>;
}

/// The `amixer` binary on `PATH`.
#[derive(Debug, Default)]
pub struct SystemAmixer;

impl MixerCommand for SystemAmixer {
    fn run(&mut self, args: &[&str]) -> Result<String> {
        let out = Command::new(PROGRAM)
            .args(args)
            .output()
            .map_err(|source| VolumeError::Command { program: PROGRAM, source })?;
        if !out.status.success() {
            return Err(VolumeError::CommandFailed {
                program: PROGRAM,
                status:  out.status,
                stderr:  String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}

pub struct AmixerControl<C: MixerCommand = SystemAmixer> {
    command: C,
    control: String,
    range:   NativeRange,
    last:    Option<i64>,
}

impl AmixerControl<SystemAmixer> {
    /// Query `control` (e.g. `"Master"`) for its range.
    pub fn open(control: &str) -> Result<Self> {
        Self::with_command(SystemAmixer, control)
    }
}

impl<C: MixerCommand> AmixerControl<C> {
    pub fn with_command(mut command: C, control: &str) -> Result<Self> {
        let stdout = command.run(&["sget", control])?;
        let range = parse_limits(&stdout)
            .ok_or_else(|| VolumeError::RangeParse(control.to_string()))?;
        if range.min >= range.max {
            return Err(VolumeError::EmptyRange { min: range.min, max: range.max });
        }
        info!("amixer control '{}' range {} - {}", control, range.min, range.max);
        Ok(AmixerControl { command, control: control.to_string(), range, last: None })
    }
}

impl<C: MixerCommand> VolumeControl for AmixerControl<C> {
    fn range(&self) -> NativeRange { self.range }

    fn set_native(&mut self, level: f32) -> Result<()> {
        let raw = self.range.clamp(level).round() as i64;
        // Unchanged step: nothing to write.
        if self.last == Some(raw) {
            return Ok(());
        }
        debug!("amixer sset {} {}", self.control, raw);
        self.command.run(&["-q", "sset", &self.control, &raw.to_string()])?;
        self.last = Some(raw);
        Ok(())
    }
}

/// Extract `(min, max)` from the first `Limits:` line of `amixer sget` output.
pub fn parse_limits(output: &str) -> Option<NativeRange> {
    let line = output.lines().find_map(|l| l.trim().strip_prefix("Limits:"))?;
    let mut numbers = line.split_whitespace().filter_map(|t| t.parse::<i64>().ok());
    let min = numbers.next()?;
    let max = numbers.next()?;
    Some(NativeRange::new(min as f32, max as f32))
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
