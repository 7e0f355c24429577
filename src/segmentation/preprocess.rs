use image::{imageops, GrayImage, RgbImage};
use imageproc::filter::gaussian_blur_f32;

use super::types::Region;

/// Sigma matching a 5x5 Gaussian kernel.
const BLUR_SIGMA: f32 = 1.1;

/// Preprocessor for turning captured frames into the grayscale region the
/// background model works on
pub struct Preprocessor {
    target_width: u32,
    target_height: u32,
    region: Region,
}

impl Preprocessor {
    pub fn new(target_width: u32, target_height: u32, region: Region) -> Self {
        Self {
            target_width,
            target_height,
            region,
        }
    }

    /// Extract the blurred grayscale region of interest from a frame
    ///
    /// Steps:
    /// 1. Resize to target dimensions
    /// 2. Mirror horizontally
    /// 3. Crop the region of interest
    /// 4. Convert to grayscale and blur
    pub fn region(&self, frame: &RgbImage) -> GrayImage {
        let _span = tracing::debug_span!("preprocess").entered();

        // Resize if needed
        let resized = if frame.dimensions() != (self.target_width, self.target_height) {
            imageops::resize(
                frame,
                self.target_width,
                self.target_height,
                imageops::FilterType::Triangle,
            )
        } else {
            frame.clone()
        };

        let mirrored = imageops::flip_horizontal(&resized);

        let Region { top, left, .. } = self.region;
        let cropped = imageops::crop_imm(
            &mirrored,
            left,
            top,
            self.region.width(),
            self.region.height(),
        )
        .to_image();

        let gray = imageops::grayscale(&cropped);
        gaussian_blur_f32(&gray, BLUR_SIGMA)
    }
}
