//! Paddle position source
//!
//! The simulation only ever sees `Option<f32>`: the paddle's target center
//! for this tick, or nothing.

use std::collections::VecDeque;

use super::camera::{Detector, FrameSource};
use super::detect::{Detection, DetectionFilter};

/// Dropped-frame streak that gets reported
const MISSED_FRAME_WARN: u32 = 30;

/// Supplies detected horizontal positions once per tick
pub trait PositionSource {
    /// `None` when no frame was available; otherwise every detected center
    /// in detector order (possibly empty)
    fn poll(&mut self) -> Option<Vec<f32>>;

    /// This tick's paddle target
    fn target(&mut self) -> Option<f32> {
        first_target(self.poll())
    }

    /// Accepted detections from the last polled frame, in frame pixels.
    /// `None` when the last poll had no frame or the source has no boxes.
    fn overlay(&self) -> Option<&[Detection]> {
        None
    }
}

/// First detection wins; no frame or no detections means no target
pub fn first_target(sample: Option<Vec<f32>>) -> Option<f32> {
    sample.and_then(|xs| xs.first().copied())
}

/// Camera + detector + filter
pub struct CameraPositionSource<C: FrameSource, D: Detector> {
    camera: C,
    detector: D,
    filter: DetectionFilter,
    /// Camera x to screen x factor, when mapping is enabled
    scale: Option<f32>,
    missed_frames: u32,
    overlay: Option<Vec<Detection>>,
}

impl<C: FrameSource, D: Detector> CameraPositionSource<C, D> {
    pub fn new(camera: C, detector: D, filter: DetectionFilter) -> Self {
        Self {
            camera,
            detector,
            filter,
            scale: None,
            missed_frames: 0,
            overlay: None,
        }
    }

    /// Rescale camera pixels into screen pixels
    pub fn with_screen_mapping(mut self, frame_width: f32, screen_width: f32) -> Self {
        if frame_width > 0.0 {
            self.scale = Some(screen_width / frame_width);
        }
        self
    }
}

impl<C: FrameSource, D: Detector> PositionSource for CameraPositionSource<C, D> {
    fn poll(&mut self) -> Option<Vec<f32>> {
        let Some(frame) = self.camera.read_frame() else {
            self.overlay = None;
            self.missed_frames += 1;
            if self.missed_frames == MISSED_FRAME_WARN {
                log::warn!("No camera frame for {} ticks", self.missed_frames);
            }
            return None;
        };
        if self.missed_frames >= MISSED_FRAME_WARN {
            log::info!("Camera frames resumed after {} misses", self.missed_frames);
        }
        self.missed_frames = 0;

        let detections = self.detector.detect(&frame);
        let accepted = self.filter.accepted(&detections);
        let mut centers = self.filter.centers(&accepted, frame.width as f32);
        if let Some(scale) = self.scale {
            for x in &mut centers {
                *x *= scale;
            }
        }
        log::trace!(
            "frame {}: {} raw, {} kept",
            frame.sequence,
            detections.len(),
            centers.len()
        );
        self.overlay = Some(accepted);
        Some(centers)
    }

    fn overlay(&self) -> Option<&[Detection]> {
        self.overlay.as_deref()
    }
}

/// Replays a fixed list of samples, then reports no frames
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    samples: VecDeque<Option<Vec<f32>>>,
}

impl ScriptedSource {
    pub fn new(samples: impl IntoIterator<Item = Option<Vec<f32>>>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl PositionSource for ScriptedSource {
    fn poll(&mut self) -> Option<Vec<f32>> {
        self.samples.pop_front().flatten()
    }
}
