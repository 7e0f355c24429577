use image::{GrayImage, Luma};
use ndarray::Array2;

use super::types::Mask;
use crate::error::{PipelineError, Result};

/// Running weighted average of the empty scene.
///
/// Frames observed during calibration are blended into a floating-point
/// accumulator. Once calibration ends the model is frozen and only used to
/// compute foreground masks.
pub struct BackgroundModel {
    accumulator: Option<Array2<f32>>,
    weight: f32,
    threshold: u8,
    frames_observed: u64,
    frozen: bool,
}

impl BackgroundModel {
    pub fn new(weight: f32, threshold: u8) -> Self {
        Self {
            accumulator: None,
            weight,
            threshold,
            frames_observed: 0,
            frozen: false,
        }
    }

    /// Blend a calibration frame into the background.
    ///
    /// The first frame seeds the accumulator; later frames update it as
    /// `acc = (1 - w) * acc + w * region`.
    pub fn observe(&mut self, region: &GrayImage) -> Result<()> {
        if self.frozen {
            return Err(PipelineError::BackgroundFrozen);
        }

        let sample = to_array(region);
        match self.accumulator.as_mut() {
            None => self.accumulator = Some(sample),
            Some(acc) => {
                check_dims(acc, region)?;
                let w = self.weight;
                acc.zip_mut_with(&sample, |a, &s| *a = (1.0 - w) * *a + w * s);
            }
        }

        self.frames_observed += 1;
        Ok(())
    }

    /// Stop accepting calibration frames.
    pub fn freeze(&mut self) {
        if !self.frozen {
            tracing::debug!(
                "Background frozen after {} calibration frames",
                self.frames_observed
            );
        }
        self.frozen = true;
    }

    /// Binary mask of pixels differing from the background by more than the threshold.
    ///
    /// The accumulator is truncated to 8 bits before differencing.
    pub fn foreground_mask(&self, region: &GrayImage) -> Result<Mask> {
        let acc = self
            .accumulator
            .as_ref()
            .ok_or(PipelineError::UninitializedModel)?;
        check_dims(acc, region)?;

        let threshold = self.threshold;
        Ok(GrayImage::from_fn(region.width(), region.height(), |x, y| {
            let background = acc[[y as usize, x as usize]] as u8;
            let diff = background.abs_diff(region.get_pixel(x, y)[0]);
            Luma([if diff > threshold { 255 } else { 0 }])
        }))
    }

    pub fn accumulator(&self) -> Option<&Array2<f32>> {
        self.accumulator.as_ref()
    }

    pub fn frames_observed(&self) -> u64 {
        self.frames_observed
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }
}

fn to_array(region: &GrayImage) -> Array2<f32> {
    let (width, height) = region.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
        region.get_pixel(x as u32, y as u32)[0] as f32
    })
}

fn check_dims(acc: &Array2<f32>, region: &GrayImage) -> Result<()> {
    let (rows, cols) = acc.dim();
    let expected = (cols as u32, rows as u32);
    let actual = region.dimensions();
    if expected != actual {
        return Err(PipelineError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
