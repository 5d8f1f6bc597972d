//! Detector output post-processing
//!
//! The detector itself is opaque. What we own is turning its raw boxes into
//! horizontal centers: class allow-list, confidence cut, mirroring.

use serde::{Deserialize, Serialize};

use crate::config::DetectorSettings;
use crate::sim::Rect;

/// Display name for the detector classes we care about
pub fn class_name(class_id: u32) -> Option<&'static str> {
    match class_id {
        0 => Some("person"),
        65 => Some("remote"),
        67 => Some("cell phone"),
        _ => None,
    }
}

/// One raw detection box in frame pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub confidence: f32,
    pub class_id: u32,
}

impl Detection {
    #[inline]
    pub fn center_x(&self) -> f32 {
        (self.x1 + self.x2) / 2.0
    }

    /// Box as a rect in frame pixels
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x1, self.y1, self.x2 - self.x1, self.y2 - self.y1)
    }

    /// "name: confidence" caption for the overlay
    pub fn label(&self) -> String {
        match class_name(self.class_id) {
            Some(name) => format!("{}: {:.2}", name, self.confidence),
            None => format!("class {}: {:.2}", self.class_id, self.confidence),
        }
    }
}

/// Keeps only detections of interest and reduces them to x centers
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionFilter {
    pub target_classes: Vec<u32>,
    /// Confidence must be strictly above this
    pub confidence_threshold: f32,
    /// Report x as seen in a horizontally flipped (selfie) frame
    pub mirror: bool,
}

impl DetectionFilter {
    pub fn new(settings: &DetectorSettings, mirror: bool) -> Self {
        Self {
            target_classes: settings.target_classes.clone(),
            confidence_threshold: settings.confidence_threshold,
            mirror,
        }
    }

    pub fn accepts(&self, detection: &Detection) -> bool {
        self.target_classes.contains(&detection.class_id)
            && detection.confidence > self.confidence_threshold
    }

    /// Accepted detections, in detector order
    pub fn accepted(&self, detections: &[Detection]) -> Vec<Detection> {
        detections
            .iter()
            .filter(|d| self.accepts(d))
            .copied()
            .collect()
    }

    /// Centers of accepted detections, in detector order
    pub fn centers(&self, detections: &[Detection], frame_width: f32) -> Vec<f32> {
        detections
            .iter()
            .filter(|d| self.accepts(d))
            .map(|d| {
                if self.mirror {
                    frame_width - d.center_x()
                } else {
                    d.center_x()
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(x1: f32, x2: f32, confidence: f32, class_id: u32) -> Detection {
        Detection {
            x1,
            y1: 0.0,
            x2,
            y2: 50.0,
            confidence,
            class_id,
        }
    }

    fn filter(mirror: bool) -> DetectionFilter {
        DetectionFilter::new(&DetectorSettings::default(), mirror)
    }

    #[test]
    fn test_class_and_confidence() {
        let f = filter(false);
        assert!(f.accepts(&det(0.0, 10.0, 0.9, 67)));
        assert!(f.accepts(&det(0.0, 10.0, 0.51, 65)));
        // Threshold is exclusive
        assert!(!f.accepts(&det(0.0, 10.0, 0.5, 67)));
        assert!(!f.accepts(&det(0.0, 10.0, 0.99, 0)));
    }

    #[test]
    fn test_centers_keep_detector_order() {
        let f = filter(false);
        let dets = [
            det(400.0, 500.0, 0.6, 65),
            det(0.0, 100.0, 0.99, 0),
            det(100.0, 200.0, 0.95, 67),
        ];
        assert_eq!(f.centers(&dets, 640.0), vec![450.0, 150.0]);
    }

    #[test]
    fn test_mirrored_centers() {
        let f = filter(true);
        let dets = [det(100.0, 140.0, 0.8, 67)];
        assert_eq!(f.centers(&dets, 640.0), vec![520.0]);
    }

    #[test]
    fn test_accepted_and_labels() {
        let f = filter(true);
        let dets = [det(10.0, 30.0, 0.9, 0), det(100.0, 140.0, 0.9, 67)];
        let kept = f.accepted(&dets);
        assert_eq!(kept, vec![dets[1]]);
        // Boxes stay in raw frame coordinates even when mirroring
        assert_eq!(kept[0].bounds(), Rect::new(100.0, 0.0, 40.0, 50.0));
        assert_eq!(kept[0].label(), "cell phone: 0.90");
        assert_eq!(det(0.0, 1.0, 0.5, 12).label(), "class 12: 0.50");
    }

    #[test]
    fn test_nothing_accepted() {
        let f = filter(true);
        assert!(f.centers(&[], 640.0).is_empty());
        assert!(f.centers(&[det(0.0, 1.0, 0.1, 67)], 640.0).is_empty());
    }
}
