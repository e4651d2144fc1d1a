//! Application configuration and wiring.
//!
//! `run` acquires the camera, the hand detector, the mixer and the window,
//! hands them to the pipeline loop, and releases them all (in reverse order,
//! by drop) when the loop ends for any reason.

use clap::{Parser, ValueEnum};
use hand_landmarks::{DetectorConfig, HandDetector};
use log::info;
use volume_map::{AmixerControl, DistanceMap, NullMixer, SimMixer, VolumeControl};

use crate::camera::SyntheticCamera;
use crate::error::{ConfigError, Result};
use crate::pipeline::{run_loop, Pipeline, RunStats};
use crate::viewer::Viewer;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub enum VolumeBackend {
    /// In-memory decibel mixer.
    Sim,
    Null,
    /// ALSA mixer control via `amixer`.
    Amixer { control: String },
}

/// Configuration for the full application.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub width:          usize,
    pub height:         usize,
    pub distance_map:   DistanceMap,
    pub hand_index:     usize,
    pub detector:       DetectorConfig,
    pub volume:         VolumeBackend,
    /// Draw the hand skeleton on the frame.
    pub draw_landmarks: bool,
    /// Stop capturing after this many frames.
    pub frame_limit:    Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            width:          640,
            height:         480,
            distance_map:   DistanceMap::default(),
            hand_index:     0,
            detector:       DetectorConfig::default(),
            volume:         VolumeBackend::Sim,
            draw_landmarks: true,
            frame_limit:    None,
        }
    }
}

/// Mixer backend selected on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    Sim,
    Null,
    Amixer,
}

/// Command line.
#[derive(Debug, Parser)]
#[command(name = "pinch_volume")]
#[command(about = "Set the system volume by pinching thumb and index finger", long_about = None)]
pub struct Cli {
    /// Pinch distance (px) mapped to 0%
    #[arg(long, value_name = "PX", default_value_t = 80.0)]
    pub min_distance: f64,

    /// Pinch distance (px) mapped to 100%
    #[arg(long, value_name = "PX", default_value_t = 250.0)]
    pub max_distance: f64,

    /// Which detected hand to track
    #[arg(long = "hand", value_name = "INDEX", default_value_t = 0)]
    pub hand_index: usize,

    /// Volume backend
    #[arg(long, value_enum, default_value_t = BackendKind::Sim)]
    pub volume: BackendKind,

    /// amixer mixer control
    #[arg(long, default_value = "Master")]
    pub control: String,

    /// Stop after this many frames
    #[arg(long, value_name = "N")]
    pub frames: Option<u64>,

    /// Frame width
    #[arg(long, value_name = "PX", default_value_t = 640, value_parser = parse_dimension)]
    pub width: usize,

    /// Frame height
    #[arg(long, value_name = "PX", default_value_t = 480, value_parser = parse_dimension)]
    pub height: usize,

    /// Don't draw the hand skeleton
    #[arg(long)]
    pub no_draw: bool,
}

impl Cli {
    /// Check the cross-field constraints and build the run configuration.
    pub fn into_config(self) -> std::result::Result<AppConfig, ConfigError> {
        let distance_map = DistanceMap::new(self.min_distance, self.max_distance)
            .ok_or(ConfigError::EmptyDistanceRange)?;

        // Enough hands must be kept for the requested index to exist.
        let wanted = self
            .hand_index
            .checked_add(1)
            .ok_or(ConfigError::HandIndex(self.hand_index))?;
        let mut detector = DetectorConfig::default();
        detector.max_num_hands = detector.max_num_hands.max(wanted);

        let volume = match self.volume {
            BackendKind::Sim    => VolumeBackend::Sim,
            BackendKind::Null   => VolumeBackend::Null,
            BackendKind::Amixer => VolumeBackend::Amixer { control: self.control },
        };

        Ok(AppConfig {
            width:          self.width,
            height:         self.height,
            distance_map,
            hand_index:     self.hand_index,
            detector,
            volume,
            draw_landmarks: !self.no_draw,
            frame_limit:    self.frames,
        })
    }
}

fn parse_dimension(value: &str) -> std::result::Result<usize, String> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        Ok(_)  => Err("must be at least 1".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

fn open_volume(backend: &VolumeBackend) -> Result<Box<dyn VolumeControl>> {
    let mixer: Box<dyn VolumeControl> = match backend {
        VolumeBackend::Sim                => Box::new(SimMixer::default()),
        VolumeBackend::Null               => Box::new(NullMixer),
        VolumeBackend::Amixer { control } => Box::new(AmixerControl::open(control)?),
    };
    Ok(mixer)
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// The hand source is the pointer-driven simulator by default and the
/// LeapMotion controller with `--features leap`.
pub fn run(cfg: AppConfig) -> Result<RunStats> {
    let volume = open_volume(&cfg.volume)?;
    let range  = volume.range();
    info!("volume backend {:?}, native range {} … {}", cfg.volume, range.min, range.max);

    #[cfg(not(feature = "leap"))]
    let (detector, viewer) = {
        let (sim_tx, sim_rx) = std::sync::mpsc::channel();
        let detector: Box<dyn HandDetector> =
            Box::new(hand_landmarks::SimHandDetector::new(sim_rx, cfg.detector));
        (detector, Viewer::new(cfg.width, cfg.height, Some(sim_tx))?)
    };

    #[cfg(feature = "leap")]
    let (detector, viewer) = {
        let detector: Box<dyn HandDetector> =
            Box::new(crate::leap::LeapHandDetector::open(cfg.detector)?);
        (detector, Viewer::new(cfg.width, cfg.height, None)?)
    };

    let mut viewer   = viewer;
    let mut camera   = SyntheticCamera::new(cfg.width, cfg.height, cfg.frame_limit);
    let mut pipeline = Pipeline::new(
        detector,
        volume,
        cfg.distance_map,
        cfg.hand_index,
        cfg.draw_landmarks,
    );

    let stats = run_loop(&mut camera, &mut pipeline, &mut viewer)?;
    info!(
        "stopped ({:?}): {} frames, {} with a hand",
        stats.exit, stats.frames, stats.hand_frames
    );
    Ok(stats)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
