use image::GrayImage;

/// Binary foreground mask: 255 for foreground pixels, 0 for background.
/// Dimensions match the region of interest.
pub type Mask = GrayImage;

/// Ordered boundary points of a connected mask region.
pub type Contour = Vec<Point>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Fixed rectangular window of a frame. `bottom` and `right` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Region {
    /// Upper two thirds of the right half of a `width` x `height` frame.
    pub fn for_frame(width: u32, height: u32) -> Self {
        Self {
            top: 0,
            bottom: 2 * height / 3,
            left: width / 2,
            right: width,
        }
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }
}

/// Extreme points of the hand's convex hull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extremities {
    pub top: Point,
    pub bottom: Point,
    pub left: Point,
    pub right: Point,
}

impl Extremities {
    /// Horizontal midpoint of the left and right extremities, rounded down.
    pub fn center_x(&self) -> i32 {
        (self.left.x + self.right.x).div_euclid(2)
    }

    pub fn width(&self) -> i32 {
        (self.right.x - self.left.x).abs()
    }
}

/// Output of a successful segmentation.
#[derive(Debug, Clone)]
pub struct Segmentation {
    pub contour: Contour,
    pub extremities: Extremities,
    pub mask: Mask,
}

/// Contour and hull primitives the segmenter and finger counter build on.
///
/// Allows swapping the image-processing backend without touching the heuristics.
pub trait ContourExtractor {
    /// Outermost contours of the non-zero regions of `mask`, with every boundary
    /// point retained.
    fn external_contours(&self, mask: &Mask) -> Vec<Contour>;

    /// Convex hull of `contour`.
    fn convex_hull(&self, contour: &[Point]) -> Vec<Point>;

    /// Area enclosed by `contour`.
    fn contour_area(&self, contour: &[Point]) -> f64 {
        polygon_area(contour)
    }
}

/// Shoelace area of a closed polygon.
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice: i64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64)
        .sum();
    (twice as f64 / 2.0).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_area() {
        let square = [
            Point::new(0, 0),
            Point::new(4, 0),
            Point::new(4, 4),
            Point::new(0, 4),
        ];
        assert_eq!(polygon_area(&square), 16.0);
        assert_eq!(polygon_area(&square[..2]), 0.0);
    }

    #[test]
    fn center_rounds_down() {
        let p = Point::new(0, 0);
        let ext = Extremities {
            top: p,
            bottom: p,
            left: Point::new(3, 5),
            right: Point::new(8, 5),
        };
        assert_eq!(ext.center_x(), 5);
        assert_eq!(ext.width(), 5);
    }
}
