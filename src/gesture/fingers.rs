//! Scan-line finger counting.
//!
//! A one-pixel horizontal probe is laid across the mask a short way below the
//! top of the hand. Each extended finger crosses the probe as a narrow run of
//! foreground pixels; the palm or forearm crosses it as a wide one. The count is
//! an approximation and can be off by one under noise or occlusion.

use image::GrayImage;

use crate::segmentation::{ContourExtractor, Extremities, Mask};

pub struct FingerCounter {
    scan_line_ratio: f64,
    min_len: usize,
    width_fraction: f64,
}

impl FingerCounter {
    pub fn new(scan_line_ratio: f32, min_len: usize, width_fraction: f32) -> Self {
        Self {
            scan_line_ratio: scan_line_ratio as f64,
            min_len,
            width_fraction: width_fraction as f64,
        }
    }

    /// Row of the mask the probe runs along.
    pub fn scan_line(&self, hand: &Extremities) -> i32 {
        let height = (hand.bottom.y - hand.top.y) as f64;
        hand.top.y + (self.scan_line_ratio * height) as i32
    }

    /// Count finger-like crossings of the scan line.
    ///
    /// A crossing counts when its contour has more than `min_len` points and fewer
    /// than `width_fraction` times the hand width. A zero-width hand has no room
    /// for fingers and yields 0.
    pub fn count<E: ContourExtractor>(
        &self,
        extractor: &E,
        mask: &Mask,
        hand: &Extremities,
    ) -> usize {
        let _span = tracing::debug_span!("count_fingers").entered();

        let width = hand.width();
        if width == 0 {
            tracing::trace!("Degenerate hand width, skipping finger count");
            return 0;
        }

        let y = self.scan_line(hand);
        if y < 0 || y as u32 >= mask.height() {
            return 0;
        }

        let probe = probe_row(mask, y as u32);
        let upper = self.width_fraction * width as f64;

        extractor
            .external_contours(&probe)
            .iter()
            .map(Vec::len)
            .filter(|&n| n > self.min_len && (n as f64) < upper)
            .count()
    }
}

/// The mask restricted to a single row.
fn probe_row(mask: &Mask, y: u32) -> GrayImage {
    let mut probe = GrayImage::new(mask.width(), mask.height());
    for x in 0..mask.width() {
        probe.put_pixel(x, y, *mask.get_pixel(x, y));
    }
    probe
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmentation::{ImageprocContours, Point};
    use image::Luma;

    fn filled(mask: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32) {
        for y in y0..y1 {
            for x in x0..x1 {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
    }

    fn hand(top: i32, bottom: i32, left: i32, right: i32) -> Extremities {
        Extremities {
            top: Point::new((left + right) / 2, top),
            bottom: Point::new((left + right) / 2, bottom),
            left: Point::new(left, (top + bottom) / 2),
            right: Point::new(right, (top + bottom) / 2),
        }
    }

    /// Palm with `fingers` vertical bars rising from it.
    fn hand_mask(fingers: u32) -> GrayImage {
        let mut mask = GrayImage::new(150, 133);
        filled(&mut mask, 40, 60, 100, 133);
        for i in 0..fingers {
            let x = 45 + i * 14;
            filled(&mut mask, x, 20, x + 8, 60);
        }
        mask
    }

    fn counter() -> FingerCounter {
        FingerCounter::new(0.2, 5, 0.75)
    }

    #[test]
    fn scan_line_sits_near_the_top() {
        assert_eq!(counter().scan_line(&hand(20, 132, 40, 99)), 42);
        assert_eq!(counter().scan_line(&hand(10, 10, 40, 99)), 10);
    }

    #[test]
    fn counts_raised_fingers() {
        let ext = hand(20, 132, 40, 99);
        for fingers in 0..=3 {
            let mask = hand_mask(fingers);
            assert_eq!(
                counter().count(&ImageprocContours, &mask, &ext),
                fingers as usize,
                "{fingers} fingers"
            );
        }
    }

    #[test]
    fn ignores_specks_and_wide_runs() {
        let mut mask = GrayImage::new(150, 133);
        // speck, finger, forearm-wide run
        filled(&mut mask, 5, 42, 6, 43);
        filled(&mut mask, 20, 42, 30, 43);
        filled(&mut mask, 60, 42, 140, 43);

        let ext = hand(20, 132, 40, 100);
        let total = ImageprocContours
            .external_contours(&probe_row(&mask, 42))
            .len();
        let count = counter().count(&ImageprocContours, &mask, &ext);

        assert_eq!(total, 3);
        assert_eq!(count, 1);
        assert!(count <= total);
    }

    #[test]
    fn zero_width_hand_has_no_fingers() {
        let mask = hand_mask(2);
        let ext = hand(20, 132, 70, 70);
        assert_eq!(counter().count(&ImageprocContours, &mask, &ext), 0);
    }

    #[test]
    fn scan_line_outside_mask_counts_nothing() {
        let mask = hand_mask(2);
        let ext = hand(200, 300, 40, 99);
        assert_eq!(counter().count(&ImageprocContours, &mask, &ext), 0);
    }
}
