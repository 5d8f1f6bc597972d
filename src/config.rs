//! Game tuning
//!
//! Every constant the simulation reads lives here so a JSON file can
//! override it. Missing fields fall back to `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Detector post-processing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorSettings {
    /// Detections must score strictly above this
    pub confidence_threshold: f32,
    /// Class ids accepted as the controller object
    pub target_classes: Vec<u32>,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            confidence_threshold: CONFIDENCE_THRESHOLD,
            target_classes: TARGET_CLASSES.to_vec(),
        }
    }
}

/// Capture device settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Device index
    pub device: u32,
    /// Frame size delivered by the device
    pub frame_width: u32,
    pub frame_height: u32,
    /// Flip detections horizontally so the paddle mirrors the player
    pub mirror: bool,
    /// Rescale camera x into screen x (off = raw pixel x)
    pub map_to_screen: bool,
    /// Fraction of frames the synthetic camera drops (0.0 - 1.0)
    pub drop_rate: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            device: 0,
            frame_width: 640,
            frame_height: 480,
            mirror: true,
            map_to_screen: false,
            drop_rate: 0.05,
        }
    }
}

/// Complete game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Wall ===
    pub grid_cols: u32,
    pub grid_rows: u32,
    pub block_height: f32,

    // === Paddle ===
    /// Explicit paddle width; `None` derives it from screen width / columns
    pub paddle_width: Option<f32>,
    pub paddle_height: f32,
    pub paddle_tolerance: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_start_vx: f32,
    pub ball_start_vy: f32,
    pub ball_max_speed: f32,

    // === Loop ===
    pub tick_rate: u32,
    /// Draw the camera overlay (detection boxes, labels, camera FPS)
    pub show_overlay: bool,

    pub detector: DetectorSettings,
    pub camera: CameraSettings,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            grid_cols: GRID_COLS,
            grid_rows: GRID_ROWS,
            block_height: BLOCK_HEIGHT,

            paddle_width: None,
            paddle_height: PADDLE_HEIGHT,
            paddle_tolerance: PADDLE_TOLERANCE,

            ball_radius: BALL_RADIUS,
            ball_start_vx: BALL_START_VX,
            ball_start_vy: BALL_START_VY,
            ball_max_speed: BALL_MAX_SPEED,

            tick_rate: TICK_RATE,
            show_overlay: true,

            detector: DetectorSettings::default(),
            camera: CameraSettings::default(),
        }
    }
}

impl Tuning {
    /// Width of one wall column
    pub fn cell_width(&self) -> f32 {
        if self.grid_cols == 0 {
            self.screen_width
        } else {
            (self.screen_width / self.grid_cols as f32).floor()
        }
    }

    /// Effective paddle width
    pub fn paddle_width(&self) -> f32 {
        self.paddle_width.unwrap_or_else(|| self.cell_width())
    }

    /// Parse tuning from JSON, then validate it
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the loop can't run with
    ///
    /// Degenerate-but-safe geometry (empty grid, paddle wider than the
    /// screen) is allowed through.
    pub fn validate(&self) -> Result<(), GameError> {
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(GameError::InvalidTuning(format!(
                "screen size must be positive, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        if self.tick_rate == 0 {
            return Err(GameError::InvalidTuning("tick_rate must be > 0".into()));
        }
        if !(self.ball_radius > 0.0) {
            return Err(GameError::InvalidTuning("ball_radius must be > 0".into()));
        }
        if !(self.paddle_height > 0.0 && self.paddle_width() > 0.0) {
            return Err(GameError::InvalidTuning("paddle size must be > 0".into()));
        }
        if !(self.block_height > 0.0) {
            return Err(GameError::InvalidTuning("block_height must be > 0".into()));
        }
        if self.grid_cols > 0 && self.cell_width() < 1.0 {
            return Err(GameError::InvalidTuning(format!(
                "{} columns don't fit in a {} wide screen",
                self.grid_cols, self.screen_width
            )));
        }
        if self.grid_rows as f32 * self.block_height > self.screen_height {
            return Err(GameError::InvalidTuning(format!(
                "{} rows of height {} overflow the screen",
                self.grid_rows, self.block_height
            )));
        }
        if !(0.0..=1.0).contains(&self.detector.confidence_threshold) {
            return Err(GameError::InvalidTuning(format!(
                "confidence_threshold {} outside 0..=1",
                self.detector.confidence_threshold
            )));
        }
        if self.detector.target_classes.is_empty() {
            log::warn!("No target classes configured; the paddle will never move");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let t = Tuning::default();
        assert_eq!(t.screen_width, 600.0);
        assert_eq!(t.grid_cols, 6);
        assert_eq!(t.paddle_width(), 100.0);
        assert_eq!(t.paddle_height, 20.0);
        assert_eq!(t.tick_rate, 30);
        assert_eq!(t.detector.target_classes, vec![67, 65]);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "grid_cols": 8, "detector": { "confidence_threshold": 0.7 } }"#;
        let t = Tuning::from_json(json).unwrap();
        assert_eq!(t.grid_cols, 8);
        assert_eq!(t.cell_width(), 75.0);
        assert_eq!(t.detector.confidence_threshold, 0.7);
        assert_eq!(t.detector.target_classes, vec![67, 65]);
        assert_eq!(t.screen_height, 600.0);
    }

    #[test]
    fn test_zero_columns_is_safe() {
        let t = Tuning {
            grid_cols: 0,
            ..Default::default()
        };
        assert_eq!(t.paddle_width(), t.screen_width);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Tuning::from_json(r#"{ "tick_rate": 0 }"#).is_err());
        assert!(Tuning::from_json(r#"{ "screen_width": -1.0 }"#).is_err());
        assert!(Tuning::from_json(r#"{ "detector": { "confidence_threshold": 2.0 } }"#).is_err());
        assert!(matches!(
            Tuning::from_json("{ nope"),
            Err(GameError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_grid() {
        // Cells would floor to zero width
        let err = Tuning::from_json(r#"{ "grid_cols": 601 }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidTuning(_)));
        assert!(Tuning::from_json(r#"{ "grid_cols": 600 }"#).is_ok());

        assert!(Tuning::from_json(r#"{ "grid_rows": 4000000000 }"#).is_err());
        assert!(Tuning::from_json(r#"{ "grid_rows": 12 }"#).is_ok());
        assert!(Tuning::from_json(r#"{ "grid_rows": 13 }"#).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Tuning::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, GameError::Config(_)));
    }
}
