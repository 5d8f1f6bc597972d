//! Where the paddle's position comes from
//!
//! - `camera`: frame and detector traits, synthetic backends
//! - `detect`: class/confidence filtering of raw detections
//! - `position`: the per-tick `PositionSource` the game loop polls

pub mod camera;
pub mod detect;
pub mod position;

pub use camera::{Detector, Frame, FrameSource, SyntheticCamera, SyntheticDetector};
pub use detect::{Detection, DetectionFilter};
pub use position::{CameraPositionSource, PositionSource, ScriptedSource, first_target};
