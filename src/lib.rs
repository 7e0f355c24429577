//! Hand gesture recognition from a live video stream.
//!
//! A static background is learned during a short calibration phase, the hand is
//! segmented against it, and a scan-line heuristic counts extended fingers. The
//! count is smoothed by voting over recent frames and mapped to rock, pointing
//! or scissors; horizontal movement of the hand is reported as waving.

pub mod capture;
pub mod config;
pub mod error;
pub mod gesture;
pub mod output;
pub mod segmentation;
pub mod session;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use gesture::GestureLabel;
pub use session::{FrameReport, GestureSession};
