use clap::Args;

use crate::error::{PipelineError, Result};
use crate::segmentation::Region;

/// Tunable parameters of the recognition pipeline.
///
/// Doubles as a set of CLI flags so the binary can flatten it into its own
/// argument parser.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Width frames are resized to before processing
    #[arg(long, default_value_t = 300)]
    pub frame_width: u32,

    /// Height frames are resized to before processing
    #[arg(long, default_value_t = 200)]
    pub frame_height: u32,

    /// Number of initial frames used to learn the background
    #[arg(long, default_value_t = 30)]
    pub calibration_frames: u64,

    /// Blend weight of each new calibration frame, in (0, 1]
    #[arg(long, default_value_t = 0.5)]
    pub bg_weight: f32,

    /// Minimum absolute difference from the background for a foreground pixel
    #[arg(long, default_value_t = 18)]
    pub threshold: u8,

    /// Horizontal center movement (pixels) above which the hand counts as waving
    #[arg(long, default_value_t = 3)]
    pub wave_threshold: i32,

    /// Frames between wave checks
    #[arg(long, default_value_t = 6)]
    pub wave_cadence: u64,

    /// Frames between finger-count votes
    #[arg(long, default_value_t = 12)]
    pub vote_cadence: u64,

    /// Upper bound on a finger crossing, as a fraction of the hand width
    #[arg(long, default_value_t = 0.75)]
    pub finger_width_fraction: f32,

    /// Crossings with this many contour points or fewer are treated as noise
    #[arg(long, default_value_t = 5)]
    pub min_finger_len: usize,

    /// Scan line position, as a fraction of the hand height from its top edge
    #[arg(long, default_value_t = 0.2)]
    pub scan_line_ratio: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            frame_width: 300,
            frame_height: 200,
            calibration_frames: 30,
            bg_weight: 0.5,
            threshold: 18,
            wave_threshold: 3,
            wave_cadence: 6,
            vote_cadence: 12,
            finger_width_fraction: 0.75,
            min_finger_len: 5,
            scan_line_ratio: 0.2,
        }
    }
}

impl PipelineConfig {
    /// The region of interest: the upper two thirds of the right half of the frame.
    pub fn roi(&self) -> Region {
        Region::for_frame(self.frame_width, self.frame_height)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(PipelineError::InvalidConfig(msg.to_string()));

        if self.frame_width < 2 || self.frame_height < 2 {
            return invalid("frame size must be at least 2x2");
        }
        if !(self.bg_weight > 0.0 && self.bg_weight <= 1.0) {
            return invalid("background weight must be in (0, 1]");
        }
        if self.calibration_frames == 0 {
            return invalid("calibration needs at least one frame");
        }
        if self.wave_cadence == 0 || self.vote_cadence == 0 {
            return invalid("wave and vote cadences must be non-zero");
        }
        if self.wave_threshold < 0 {
            return invalid("wave threshold must not be negative");
        }
        if !(self.finger_width_fraction > 0.0) {
            return invalid("finger width fraction must be positive");
        }
        if !(0.0..=1.0).contains(&self.scan_line_ratio) {
            return invalid("scan line ratio must be in [0, 1]");
        }
        Ok(())
    }
}
