mod background;
mod contours;
mod preprocess;
mod segmenter;
pub mod types;

pub use background::BackgroundModel;
pub use contours::ImageprocContours;
pub use preprocess::Preprocessor;
pub use segmenter::{extremities, Segmenter};
pub use types::{
    polygon_area, Contour, ContourExtractor, Extremities, Mask, Point, Region, Segmentation,
};
