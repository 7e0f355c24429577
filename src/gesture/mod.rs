mod classifier;
mod fingers;
mod tracker;

pub use classifier::{classify, GestureLabel};
pub use fingers::FingerCounter;
pub use tracker::{majority_vote, HandObservation, HandState, HandTracker, TrackingStatus};
