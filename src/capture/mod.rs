mod sequence;
mod webcam;

pub use sequence::ImageSequence;
pub use webcam::WebcamCapture;

use anyhow::Result;
use image::RgbImage;

/// Trait for frame sources
pub trait CaptureSource {
    /// Capture a single frame
    ///
    /// Returns `Ok(None)` once the source has no more frames.
    fn capture_frame(&mut self) -> Result<Option<RgbImage>>;

    /// Get the resolution of captured frames
    fn resolution(&self) -> (u32, u32);
}
