use std::fmt;

use super::tracker::TrackingStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureLabel {
    Calibrating,
    NoHand,
    Rock,
    Pointing,
    Scissors,
    Waving,
    Unknown,
}

impl GestureLabel {
    pub fn display_text(&self) -> &'static str {
        match self {
            GestureLabel::Calibrating => "Calibrating...",
            GestureLabel::NoHand => "No hand detected",
            GestureLabel::Rock => "Rock",
            GestureLabel::Pointing => "Pointing",
            GestureLabel::Scissors => "Scissors",
            GestureLabel::Waving => "Waving",
            GestureLabel::Unknown => "Unknown Gesture",
        }
    }

    /// Static pose for a voted finger count.
    pub fn from_finger_count(count: Option<usize>) -> Self {
        match count {
            Some(0) => GestureLabel::Rock,
            Some(1) => GestureLabel::Pointing,
            Some(2) => GestureLabel::Scissors,
            Some(_) | None => GestureLabel::Unknown,
        }
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_text())
    }
}

/// Label for the current tracker state. Waving wins over any static pose.
pub fn classify(status: TrackingStatus<'_>) -> GestureLabel {
    match status {
        TrackingStatus::Calibrating => GestureLabel::Calibrating,
        TrackingStatus::Uninitialized | TrackingStatus::NotInFrame(_) => GestureLabel::NoHand,
        TrackingStatus::Tracking(hand) if hand.waving => GestureLabel::Waving,
        TrackingStatus::Tracking(hand) => GestureLabel::from_finger_count(hand.finger_count),
    }
}
