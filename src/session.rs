use image::{GrayImage, RgbImage};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::gesture::{
    classify, FingerCounter, GestureLabel, HandObservation, HandTracker, TrackingStatus,
};
use crate::segmentation::{
    BackgroundModel, ContourExtractor, ImageprocContours, Preprocessor, Region, Segmentation,
    Segmenter,
};

/// Everything the pipeline produced for one frame.
#[derive(Debug, Clone)]
pub struct FrameReport {
    pub index: u64,
    pub label: GestureLabel,
    pub roi: Region,
    /// Present when a hand was segmented in this frame.
    pub hand: Option<Segmentation>,
    /// Raw, unvoted finger count for this frame.
    pub raw_fingers: Option<usize>,
}

/// Per-session recognition context.
///
/// Owns the background model, the hand tracker and the frame counter, and runs
/// each frame through calibration or segmentation, finger counting, tracking
/// and classification.
pub struct GestureSession<E = ImageprocContours> {
    config: PipelineConfig,
    preprocessor: Preprocessor,
    background: BackgroundModel,
    segmenter: Segmenter<E>,
    fingers: FingerCounter,
    tracker: HandTracker,
    frames_elapsed: u64,
}

impl GestureSession<ImageprocContours> {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        Self::with_extractor(config, ImageprocContours)
    }
}

impl<E: ContourExtractor> GestureSession<E> {
    pub fn with_extractor(config: PipelineConfig, extractor: E) -> Result<Self> {
        config.validate()?;

        let preprocessor = Preprocessor::new(config.frame_width, config.frame_height, config.roi());
        let background = BackgroundModel::new(config.bg_weight, config.threshold);
        let fingers = FingerCounter::new(
            config.scan_line_ratio,
            config.min_finger_len,
            config.finger_width_fraction,
        );
        let tracker = HandTracker::new(
            config.wave_threshold,
            config.wave_cadence,
            config.vote_cadence,
        );

        Ok(Self {
            config,
            preprocessor,
            background,
            segmenter: Segmenter::new(extractor),
            fingers,
            tracker,
            frames_elapsed: 0,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn frames_elapsed(&self) -> u64 {
        self.frames_elapsed
    }

    pub fn is_calibrating(&self) -> bool {
        self.frames_elapsed < self.config.calibration_frames
    }

    pub fn background(&self) -> &BackgroundModel {
        &self.background
    }

    pub fn tracker(&self) -> &HandTracker {
        &self.tracker
    }

    /// Label for the session's current state.
    pub fn label(&self) -> GestureLabel {
        if self.is_calibrating() {
            classify(TrackingStatus::Calibrating)
        } else {
            classify(self.tracker.status())
        }
    }

    /// Preprocess a captured frame and run it through the pipeline.
    pub fn process_frame(&mut self, frame: &RgbImage) -> Result<FrameReport> {
        let region = self.preprocessor.region(frame);
        self.process_region(&region)
    }

    /// Run an already extracted grayscale region through the pipeline.
    pub fn process_region(&mut self, region: &GrayImage) -> Result<FrameReport> {
        let index = self.frames_elapsed;
        let mut hand = None;
        let mut raw_fingers = None;

        if self.is_calibrating() {
            self.background.observe(region)?;
            if index + 1 == self.config.calibration_frames {
                tracing::info!("Calibration finished after {} frames", index + 1);
            }
        } else {
            self.background.freeze();
            let mask = self.background.foreground_mask(region)?;

            let observation = self.segmenter.segment(mask).map(|seg| {
                let extractor = self.segmenter.extractor();
                let count = self.fingers.count(extractor, &seg.mask, &seg.extremities);
                raw_fingers = Some(count);
                let obs = HandObservation {
                    extremities: seg.extremities,
                    fingers: count,
                };
                hand = Some(seg);
                obs
            });

            self.tracker.update(index, observation);
        }

        let label = self.label();
        self.frames_elapsed += 1;

        Ok(FrameReport {
            index,
            label,
            roi: self.config.roi(),
            hand,
            raw_fingers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use image::Luma;

    const BACKGROUND: u8 = 50;

    fn empty_region() -> GrayImage {
        GrayImage::from_pixel(150, 133, Luma([BACKGROUND]))
    }

    fn fill(region: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32) {
        for y in y0..y1 {
            for x in x0..x1 {
                region.put_pixel(x, y, Luma([200]));
            }
        }
    }

    /// Palm at `x`..`x + 60` with `fingers` bars raised above it.
    fn hand_region(x: u32, fingers: u32) -> GrayImage {
        let mut region = empty_region();
        fill(&mut region, x, 60, x + 60, 133);
        for i in 0..fingers {
            let fx = x + 5 + i * 14;
            fill(&mut region, fx, 20, fx + 8, 60);
        }
        region
    }

    fn calibrated() -> GestureSession {
        let mut session = GestureSession::new(PipelineConfig::default()).unwrap();
        for _ in 0..30 {
            session.process_region(&empty_region()).unwrap();
        }
        session
    }

    #[test]
    fn calibration_frames_are_labelled_calibrating() {
        let mut session = GestureSession::new(PipelineConfig::default()).unwrap();
        for i in 0..30 {
            // content does not matter while calibrating
            let region = if i % 2 == 0 {
                empty_region()
            } else {
                hand_region(40, 2)
            };
            let report = session.process_region(&region).unwrap();
            assert_eq!(report.index, i);
            assert_eq!(report.label, GestureLabel::Calibrating);
            assert!(report.hand.is_none());
        }
        assert_eq!(session.background().frames_observed(), 30);
        assert!(!session.is_calibrating());
    }

    #[test]
    fn empty_scene_after_calibration_has_no_hand() {
        let mut session = calibrated();
        let report = session.process_region(&empty_region()).unwrap();
        assert_eq!(report.label, GestureLabel::NoHand);
        assert!(session.background().is_frozen());
        assert!(session.tracker().hand().is_none());
    }

    #[test]
    fn scissors_after_first_vote() {
        let mut session = calibrated();
        let region = hand_region(40, 2);

        // frames 30..=35: hand seen, no vote yet
        for _ in 30..36 {
            let report = session.process_region(&region).unwrap();
            assert_eq!(report.label, GestureLabel::Unknown);
            assert_eq!(report.raw_fingers, Some(2));
        }

        let report = session.process_region(&region).unwrap();
        assert_eq!(report.index, 36);
        assert_eq!(report.label, GestureLabel::Scissors);
        assert!(report.hand.is_some());
    }

    #[test]
    fn rock_for_a_closed_hand() {
        let mut session = calibrated();
        let mut report = None;
        for _ in 30..37 {
            report = Some(session.process_region(&hand_region(40, 0)).unwrap());
        }
        assert_eq!(report.unwrap().label, GestureLabel::Rock);
    }

    #[test]
    fn lost_hand_keeps_last_position() {
        let mut session = calibrated();
        session.process_region(&hand_region(40, 1)).unwrap();
        let before = session.tracker().hand().unwrap().extremities();

        for _ in 0..5 {
            let report = session.process_region(&empty_region()).unwrap();
            assert_eq!(report.label, GestureLabel::NoHand);
            assert!(report.hand.is_none());

            let hand = session.tracker().hand().unwrap();
            assert!(!hand.in_frame);
            assert_eq!(hand.extremities(), before);
        }
    }

    #[test]
    fn moving_hand_is_waving() {
        let mut session = calibrated();
        for _ in 30..36 {
            session.process_region(&hand_region(20, 2)).unwrap();
        }
        let report = session.process_region(&hand_region(60, 2)).unwrap();
        assert_eq!(report.index, 36);
        assert_eq!(report.label, GestureLabel::Waving);
    }

    #[test]
    fn session_without_calibration_is_rejected() {
        let config = PipelineConfig {
            calibration_frames: 0,
            ..Default::default()
        };
        assert!(matches!(
            GestureSession::new(config),
            Err(PipelineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_invalid_config() {
        let config = PipelineConfig {
            wave_cadence: 0,
            ..Default::default()
        };
        assert!(GestureSession::new(config).is_err());
    }
}
