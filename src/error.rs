//! Error type for setup-time failures
//!
//! Only startup can fail. Once the loop is running every per-tick problem
//! (dropped frame, empty detection) is absorbed locally.

use std::fmt;

#[derive(Debug)]
pub enum GameError {
    /// The capture device could not be opened
    CameraUnavailable { device: u32, reason: String },
    /// Config file could not be read or parsed
    Config(String),
    /// Config parsed but holds values the simulation can't run with
    InvalidTuning(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::CameraUnavailable { device, reason } => {
                write!(f, "failed to open camera {}: {}", device, reason)
            }
            GameError::Config(msg) => write!(f, "config error: {}", msg),
            GameError::InvalidTuning(msg) => write!(f, "invalid tuning: {}", msg),
        }
    }
}

impl std::error::Error for GameError {}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Config(e.to_string())
    }
}
