use super::types::{Contour, ContourExtractor, Extremities, Mask, Point, Segmentation};

/// Picks the hand out of a foreground mask.
pub struct Segmenter<E> {
    extractor: E,
}

impl<E: ContourExtractor> Segmenter<E> {
    pub fn new(extractor: E) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Find the largest external contour in `mask` and the extremities of its hull.
    ///
    /// Returns `None` when the mask holds no foreground at all. Area ties keep
    /// the contour the extractor reported first.
    pub fn segment(&self, mask: Mask) -> Option<Segmentation> {
        let _span = tracing::debug_span!("segment").entered();

        let contours = self.extractor.external_contours(&mask);
        tracing::trace!("Found {} external contours", contours.len());

        let contour = self.largest(contours)?;
        let hull = self.extractor.convex_hull(&contour);
        let extremities = extremities(&hull)?;

        Some(Segmentation {
            contour,
            extremities,
            mask,
        })
    }

    fn largest(&self, contours: Vec<Contour>) -> Option<Contour> {
        let mut best: Option<(f64, Contour)> = None;
        for contour in contours {
            let area = self.extractor.contour_area(&contour);
            match &best {
                Some((best_area, _)) if area <= *best_area => {}
                _ => best = Some((area, contour)),
            }
        }
        best.map(|(_, contour)| contour)
    }
}

/// Topmost, bottommost, leftmost and rightmost hull points; ties keep the
/// earliest point in hull order.
pub fn extremities(hull: &[Point]) -> Option<Extremities> {
    let first = *hull.first()?;
    let mut ext = Extremities {
        top: first,
        bottom: first,
        left: first,
        right: first,
    };

    for &p in &hull[1..] {
        if p.y < ext.top.y {
            ext.top = p;
        }
        if p.y > ext.bottom.y {
            ext.bottom = p;
        }
        if p.x < ext.left.x {
            ext.left = p;
        }
        if p.x > ext.right.x {
            ext.right = p;
        }
    }

    Some(ext)
}
