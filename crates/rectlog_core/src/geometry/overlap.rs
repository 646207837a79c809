//! Separating-axis overlap test.
//!
//! Two rectangles are disjoint iff one of them starts strictly past the far
//! edge of the other on either axis. Comparisons are strict, so rectangles
//! that only touch along an edge or a corner count as overlapping.

use crate::model::rect::Rect;

/// Returns `true` when `reference` and `candidate` share at least one point.
///
/// Far edges are computed in `i128`, so no `i64` input can overflow. Negative
/// extents are not rejected and simply move the far edge below the origin.
pub fn intersects(reference: &Rect, candidate: &Rect) -> bool {
    let (rx, ry) = (i128::from(reference.x), i128::from(reference.y));
    let (cx, cy) = (i128::from(candidate.x), i128::from(candidate.y));

    let disjoint = rx > cx + i128::from(candidate.width)
        || cx > rx + i128::from(reference.width)
        || ry > cy + i128::from(candidate.height)
        || cy > ry + i128::from(reference.height);

    !disjoint
}

#[cfg(test)]
mod tests {
    use super::intersects;
    use crate::model::rect::Rect;

    const UNIT: Rect = Rect::new(0, 0, 10, 10);

    #[test]
    fn touching_right_edge_overlaps() {
        assert!(intersects(&UNIT, &Rect::new(10, 0, 5, 5)));
    }

    #[test]
    fn gap_of_one_is_disjoint() {
        assert!(!intersects(&UNIT, &Rect::new(11, 0, 5, 5)));
    }

    #[test]
    fn touching_corner_overlaps() {
        assert!(intersects(&UNIT, &Rect::new(10, 10, 1, 1)));
        assert!(intersects(&UNIT, &Rect::new(-4, -4, 4, 4)));
    }

    #[test]
    fn disjoint_on_each_side() {
        assert!(!intersects(&UNIT, &Rect::new(-6, 0, 5, 5)));
        assert!(!intersects(&UNIT, &Rect::new(0, -6, 5, 5)));
        assert!(!intersects(&UNIT, &Rect::new(0, 11, 5, 5)));
    }

    #[test]
    fn containment_overlaps_both_ways() {
        let inner = Rect::new(2, 2, 3, 3);
        assert!(intersects(&UNIT, &inner));
        assert!(intersects(&inner, &UNIT));
    }

    #[test]
    fn symmetric_over_small_grid() {
        let mut rects = Vec::new();
        for x in -3..=3 {
            for y in -3..=3 {
                for w in [-2, 0, 1, 3] {
                    for h in [-1, 0, 2] {
                        rects.push(Rect::new(x, y, w, h));
                    }
                }
            }
        }
        let reference = Rect::new(0, 0, 2, 2);
        for candidate in &rects {
            assert_eq!(
                intersects(&reference, candidate),
                intersects(candidate, &reference),
                "asymmetric result for {candidate:?}"
            );
        }
    }

    #[test]
    fn non_negative_rect_overlaps_itself() {
        for rect in [
            Rect::new(0, 0, 0, 0),
            Rect::new(-5, 7, 3, 0),
            Rect::new(100, -100, 1, 1),
        ] {
            assert!(intersects(&rect, &rect), "{rect:?} should overlap itself");
        }
    }

    #[test]
    fn negative_extents_are_evaluated_arithmetically() {
        // Far x edge of the candidate lands at 0, touching the reference.
        assert!(intersects(&UNIT, &Rect::new(5, 0, -5, 1)));
        // Far x edge at -1 is strictly left of the reference.
        assert!(!intersects(&UNIT, &Rect::new(5, 0, -6, 1)));
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        let huge = Rect::new(i64::MAX, i64::MAX, i64::MAX, i64::MAX);
        let tiny = Rect::new(i64::MIN, i64::MIN, i64::MAX, i64::MAX);
        assert!(intersects(&huge, &huge));
        assert!(!intersects(&huge, &tiny));
    }
}
