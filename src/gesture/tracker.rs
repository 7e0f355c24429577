use std::collections::{BTreeMap, VecDeque};

use crate::segmentation::{Extremities, Point};

/// What the pipeline learned about the hand in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandObservation {
    pub extremities: Extremities,
    /// Raw finger count for this frame only.
    pub fingers: usize,
}

/// Persistent state of the tracked hand.
#[derive(Debug, Clone)]
pub struct HandState {
    pub top: Point,
    pub bottom: Point,
    pub left: Point,
    pub right: Point,
    pub center_x: i32,
    pub prev_center_x: i32,
    pub in_frame: bool,
    pub waving: bool,
    /// Stable finger count from the last vote; `None` until the first vote.
    pub finger_count: Option<usize>,
    history: VecDeque<usize>,
}

impl HandState {
    fn new(extremities: &Extremities, history_len: usize) -> Self {
        Self {
            top: extremities.top,
            bottom: extremities.bottom,
            left: extremities.left,
            right: extremities.right,
            center_x: extremities.center_x(),
            prev_center_x: 0,
            in_frame: true,
            waving: false,
            finger_count: None,
            history: VecDeque::with_capacity(history_len),
        }
    }

    pub fn extremities(&self) -> Extremities {
        Extremities {
            top: self.top,
            bottom: self.bottom,
            left: self.left,
            right: self.right,
        }
    }

    /// Finger samples collected since the last vote, oldest first.
    pub fn history(&self) -> impl Iterator<Item = usize> + '_ {
        self.history.iter().copied()
    }
}

/// Tracker state as seen by the classifier.
#[derive(Debug, Clone, Copy)]
pub enum TrackingStatus<'a> {
    /// Still learning the background.
    Calibrating,
    /// No hand has been seen yet.
    Uninitialized,
    /// A hand was seen before but not in the current frame.
    NotInFrame(&'a HandState),
    Tracking(&'a HandState),
}

/// Follows the single hand across frames.
///
/// Position updates every frame it is visible, wave detection runs every
/// `wave_cadence` frames and the finger count is re-voted every
/// `vote_cadence` frames.
pub struct HandTracker {
    hand: Option<HandState>,
    wave_threshold: i32,
    wave_cadence: u64,
    vote_cadence: u64,
}

impl HandTracker {
    /// # Panics
    ///
    /// Panics if either cadence is zero. [`PipelineConfig::validate`] rejects such
    /// configurations before a session builds its tracker.
    ///
    /// [`PipelineConfig::validate`]: crate::config::PipelineConfig::validate
    pub fn new(wave_threshold: i32, wave_cadence: u64, vote_cadence: u64) -> Self {
        assert!(
            wave_cadence > 0 && vote_cadence > 0,
            "tracker cadences must be non-zero"
        );
        Self {
            hand: None,
            wave_threshold,
            wave_cadence,
            vote_cadence,
        }
    }

    pub fn hand(&self) -> Option<&HandState> {
        self.hand.as_ref()
    }

    pub fn status(&self) -> TrackingStatus<'_> {
        match &self.hand {
            None => TrackingStatus::Uninitialized,
            Some(hand) if hand.in_frame => TrackingStatus::Tracking(hand),
            Some(hand) => TrackingStatus::NotInFrame(hand),
        }
    }

    /// Advance the tracker to frame `index`.
    ///
    /// `None` means segmentation found nothing this frame: the hand is marked
    /// out of frame and everything else is left as it was.
    pub fn update(&mut self, index: u64, observation: Option<HandObservation>) {
        let Some(obs) = observation else {
            if let Some(hand) = self.hand.as_mut() {
                hand.in_frame = false;
            }
            return;
        };

        let history_len = self.vote_cadence as usize;
        let hand = self.hand.get_or_insert_with(|| {
            tracing::debug!("Hand acquired at frame {}", index);
            HandState::new(&obs.extremities, history_len)
        });
        hand.top = obs.extremities.top;
        hand.bottom = obs.extremities.bottom;
        hand.left = obs.extremities.left;
        hand.right = obs.extremities.right;
        hand.in_frame = true;

        if index % self.wave_cadence == 0 {
            hand.prev_center_x = hand.center_x;
            hand.center_x = obs.extremities.center_x();
            hand.waving = (hand.center_x - hand.prev_center_x).abs() > self.wave_threshold;
        }

        if hand.history.len() == history_len {
            hand.history.pop_front();
        }
        hand.history.push_back(obs.fingers);

        if index % self.vote_cadence == 0 {
            let samples: Vec<usize> = hand.history.drain(..).collect();
            if let Some(count) = majority_vote(&samples) {
                tracing::debug!("Finger vote at frame {}: {} from {:?}", index, count, samples);
                hand.finger_count = Some(count);
            }
        }
    }
}

/// Most frequent value in `samples`; ties go to the smallest value.
pub fn majority_vote(samples: &[usize]) -> Option<usize> {
    let mut counts = BTreeMap::new();
    for &s in samples {
        *counts.entry(s).or_insert(0usize) += 1;
    }

    // Ascending iteration with a strict comparison keeps the smallest tied value.
    let mut best: Option<(usize, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}
