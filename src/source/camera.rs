//! Frame and detector backends
//!
//! A real deployment plugs a capture device and an object detector in
//! behind `FrameSource` and `Detector`. The synthetic backends here stand in
//! for both so the game runs headless and reproducibly from a seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::detect::Detection;
use crate::config::CameraSettings;
use crate::error::GameError;

/// One captured video frame
///
/// The pixel buffer is opaque to the game; only detectors look inside.
#[derive(Debug, Clone)]
pub struct Frame {
    pub sequence: u64,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// A capture device
///
/// Implementations release the device in `Drop` so every exit path
/// (quit, setup error, unwinding) lets go of it.
pub trait FrameSource {
    /// Next frame, or `None` when the device produced nothing this tick
    fn read_frame(&mut self) -> Option<Frame>;
}

/// An object detector
pub trait Detector {
    /// Raw detections for a frame, in the detector's own order
    fn detect(&mut self, frame: &Frame) -> Vec<Detection>;
}

/// Camera stand-in that produces empty frames and drops some of them
pub struct SyntheticCamera {
    device: u32,
    width: u32,
    height: u32,
    drop_rate: f64,
    sequence: u64,
    rng: Pcg32,
}

impl SyntheticCamera {
    /// Acquire the device
    pub fn open(settings: &CameraSettings, seed: u64) -> Result<Self, GameError> {
        if settings.frame_width == 0 || settings.frame_height == 0 {
            return Err(GameError::CameraUnavailable {
                device: settings.device,
                reason: format!(
                    "unsupported frame size {}x{}",
                    settings.frame_width, settings.frame_height
                ),
            });
        }
        if !(0.0..=1.0).contains(&settings.drop_rate) {
            return Err(GameError::CameraUnavailable {
                device: settings.device,
                reason: format!("drop rate {} outside 0..=1", settings.drop_rate),
            });
        }

        log::info!(
            "Camera {} opened ({}x{})",
            settings.device,
            settings.frame_width,
            settings.frame_height
        );
        Ok(Self {
            device: settings.device,
            width: settings.frame_width,
            height: settings.frame_height,
            drop_rate: settings.drop_rate,
            sequence: 0,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    pub fn frame_width(&self) -> u32 {
        self.width
    }
}

impl FrameSource for SyntheticCamera {
    fn read_frame(&mut self) -> Option<Frame> {
        self.sequence += 1;
        if self.rng.random_bool(self.drop_rate) {
            return None;
        }
        Some(Frame {
            sequence: self.sequence,
            width: self.width,
            height: self.height,
            pixels: Vec::new(),
        })
    }
}

impl Drop for SyntheticCamera {
    fn drop(&mut self) {
        log::info!(
            "Camera {} released after {} frames",
            self.device,
            self.sequence
        );
    }
}

/// Detector stand-in: one target object sweeping left and right, plus the
/// noise a real detector reports (other classes, weak scores, misses)
pub struct SyntheticDetector {
    target_class: u32,
    /// Radians of sweep per frame
    sweep_rate: f32,
    rng: Pcg32,
}

/// Class id the synthetic detector uses for decoys (not a default target)
pub const DECOY_CLASS: u32 = 0;

impl SyntheticDetector {
    pub fn new(target_class: u32, seed: u64) -> Self {
        Self {
            target_class,
            sweep_rate: 0.04,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    fn target_box(&self, frame: &Frame) -> (f32, f32) {
        let half = frame.width as f32 / 2.0;
        let amplitude = (half - 60.0).max(0.0);
        let cx = half + amplitude * (frame.sequence as f32 * self.sweep_rate).sin();
        (cx - 40.0, cx + 40.0)
    }
}

impl Detector for SyntheticDetector {
    fn detect(&mut self, frame: &Frame) -> Vec<Detection> {
        let mut detections = Vec::new();
        let h = frame.height as f32;

        // Something else in view, reported ahead of the target
        if self.rng.random_bool(0.1) {
            let x = self.rng.random_range(0.0..frame.width.max(1) as f32);
            detections.push(Detection {
                x1: x,
                y1: 0.0,
                x2: x + 120.0,
                y2: h,
                confidence: self.rng.random_range(0.6..0.99),
                class_id: DECOY_CLASS,
            });
        }

        // Target missed entirely now and then
        if self.rng.random_bool(0.05) {
            return detections;
        }

        let (x1, x2) = self.target_box(frame);
        let confidence = if self.rng.random_bool(0.05) {
            self.rng.random_range(0.2..0.5)
        } else {
            self.rng.random_range(0.55..0.97)
        };
        detections.push(Detection {
            x1,
            y1: h * 0.4,
            x2,
            y2: h * 0.6,
            confidence,
            class_id: self.target_class,
        });
        detections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_rejects_zero_frame() {
        let settings = CameraSettings {
            frame_width: 0,
            ..Default::default()
        };
        let err = SyntheticCamera::open(&settings, 1).err().unwrap();
        assert!(matches!(err, GameError::CameraUnavailable { device: 0, .. }));
    }

    #[test]
    fn test_no_drops() {
        let settings = CameraSettings {
            drop_rate: 0.0,
            ..Default::default()
        };
        let mut cam = SyntheticCamera::open(&settings, 7).unwrap();
        for i in 1..=20 {
            let frame = cam.read_frame().unwrap();
            assert_eq!(frame.sequence, i);
            assert_eq!(frame.width, 640);
        }
    }

    #[test]
    fn test_always_drops() {
        let settings = CameraSettings {
            drop_rate: 1.0,
            ..Default::default()
        };
        let mut cam = SyntheticCamera::open(&settings, 7).unwrap();
        assert!((0..20).all(|_| cam.read_frame().is_none()));
    }

    #[test]
    fn test_detector_is_deterministic() {
        let frame = Frame {
            sequence: 12,
            width: 640,
            height: 480,
            pixels: Vec::new(),
        };
        let mut a = SyntheticDetector::new(67, 99);
        let mut b = SyntheticDetector::new(67, 99);
        for _ in 0..50 {
            assert_eq!(a.detect(&frame), b.detect(&frame));
        }
    }

    #[test]
    fn test_target_stays_in_frame() {
        let det = SyntheticDetector::new(67, 1);
        for seq in 0..500 {
            let frame = Frame {
                sequence: seq,
                width: 640,
                height: 480,
                pixels: Vec::new(),
            };
            let (x1, x2) = det.target_box(&frame);
            let cx = (x1 + x2) / 2.0;
            assert!((0.0..=640.0).contains(&cx));
        }
    }
}
