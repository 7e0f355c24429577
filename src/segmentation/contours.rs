use imageproc::contours::{find_contours, BorderType};
use imageproc::geometry::convex_hull;

use super::types::{Contour, ContourExtractor, Mask, Point};

/// [`ContourExtractor`] backed by `imageproc`'s border following.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageprocContours;

impl ContourExtractor for ImageprocContours {
    fn external_contours(&self, mask: &Mask) -> Vec<Contour> {
        find_contours::<i32>(mask)
            .into_iter()
            .filter(|c| c.parent.is_none() && matches!(c.border_type, BorderType::Outer))
            .map(|c| c.points.iter().map(|p| Point::new(p.x, p.y)).collect())
            .collect()
    }

    fn convex_hull(&self, contour: &[Point]) -> Vec<Point> {
        if contour.len() < 3 {
            return contour.to_vec();
        }

        let points: Vec<imageproc::point::Point<i32>> = contour
            .iter()
            .map(|p| imageproc::point::Point::new(p.x, p.y))
            .collect();

        let hull: Vec<Point> = convex_hull(points.as_slice())
            .into_iter()
            .map(|p| Point::new(p.x, p.y))
            .collect();

        // Collinear input can collapse to nothing.
        if hull.is_empty() {
            contour.to_vec()
        } else {
            hull
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn filled(mask: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32) {
        for y in y0..y1 {
            for x in x0..x1 {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
    }

    #[test]
    fn finds_one_contour_per_blob() {
        let mut mask = GrayImage::new(40, 40);
        filled(&mut mask, 2, 2, 10, 10);
        filled(&mut mask, 20, 20, 35, 30);

        let contours = ImageprocContours.external_contours(&mask);
        assert_eq!(contours.len(), 2);
    }

    #[test]
    fn holes_are_not_external() {
        let mut mask = GrayImage::new(30, 30);
        filled(&mut mask, 5, 5, 25, 25);
        for y in 10..20 {
            for x in 10..20 {
                mask.put_pixel(x, y, Luma([0]));
            }
        }

        assert_eq!(ImageprocContours.external_contours(&mask).len(), 1);
    }

    #[test]
    fn hull_of_rectangle_spans_its_corners() {
        let mut mask = GrayImage::new(30, 40);
        filled(&mut mask, 10, 10, 20, 30);

        let contour = &ImageprocContours.external_contours(&mask)[0];
        let hull = ImageprocContours.convex_hull(contour);

        assert_eq!(hull.iter().map(|p| p.x).min(), Some(10));
        assert_eq!(hull.iter().map(|p| p.x).max(), Some(19));
        assert_eq!(hull.iter().map(|p| p.y).min(), Some(10));
        assert_eq!(hull.iter().map(|p| p.y).max(), Some(29));
    }
}
