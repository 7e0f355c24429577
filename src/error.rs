use thiserror::Error;

/// Errors raised by the recognition pipeline.
///
/// Per-frame conditions such as "no hand in view" are not errors; they show up
/// in the frame's [`GestureLabel`](crate::gesture::GestureLabel) instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    /// The foreground mask was requested before any calibration frame was observed.
    #[error("background model has not been seeded with a calibration frame")]
    UninitializedModel,

    /// A calibration frame arrived after the background was frozen.
    #[error("background model is frozen; calibration has already finished")]
    BackgroundFrozen,

    #[error("region size mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;
