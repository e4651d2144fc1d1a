use hand_landmarks::{DetectError, LandmarkError};
use thiserror::Error;
use volume_map::VolumeError;

/// Everything that can stop the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("window error: {0}")]
    Window(String),

    #[error(transparent)]
    Detect(#[from] DetectError),

    #[error("detector returned an incomplete hand: {0}")]
    IncompleteHand(#[from] LandmarkError),

    #[error("volume control failed: {0}")]
    Volume(#[from] VolumeError),
}

/// Command-line values that parse on their own but don't fit together.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--min-distance must be below --max-distance")]
    EmptyDistanceRange,

    #[error("hand index {0} is too large")]
    HandIndex(usize),
}

pub type Result<T> = std::result::Result<T, AppError>;
