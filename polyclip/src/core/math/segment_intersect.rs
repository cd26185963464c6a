use super::{
    base_math::{dist_squared, min_max, point_from_parametric, point_on_segment_eps},
    orient2d, Orientation, Vector2,
};
use crate::core::traits::Real;

/// Holds the result of intersecting two line segments.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SegIntr<T>
where
    T: Real,
{
    /// Segments do not touch.
    NoIntersect,
    /// Segments cross or touch at a single point.
    OneIntersect {
        /// Intersect position. When the contact is an endpoint (within epsilon) of either segment
        /// this is that endpoint exactly.
        point: Vector2<T>,
    },
    /// Segments are collinear and share a portion of their length.
    Overlapping {
        /// One end of the shared portion.
        point1: Vector2<T>,
        /// Other end of the shared portion.
        point2: Vector2<T>,
    },
}

/// Finds the intersect between the segments `v1->v2` and `u1->u2`.
///
/// Contacts are resolved in two stages:
///
/// 1. Endpoint contacts: every endpoint lying within `epsilon` of the other segment is a contact
///    at that endpoint. Two distinct contacts mean the segments overlap, one means they touch.
/// 2. Otherwise the segments can only meet in a proper crossing, decided with the exact
///    [orient2d] predicate: each segment's endpoints must lie strictly on opposite sides of the
///    other segment's line.
///
/// Both segments are expected to have non zero length (longer than `epsilon`).
///
/// # Examples
///
/// ```
/// # use polyclip::core::math::*;
/// let v1 = Vector2::new(0.0, 0.0);
/// let v2 = Vector2::new(2.0, 0.0);
/// // crossing
/// let intr = seg_seg_intr(v1, v2, Vector2::new(1.0, -1.0), Vector2::new(1.0, 1.0), 1e-5);
/// assert_eq!(intr, SegIntr::OneIntersect { point: Vector2::new(1.0, 0.0) });
/// // collinear overlap
/// let intr = seg_seg_intr(v1, v2, Vector2::new(1.0, 0.0), Vector2::new(3.0, 0.0), 1e-5);
/// assert!(matches!(intr, SegIntr::Overlapping { .. }));
/// // parallel, apart
/// let intr = seg_seg_intr(v1, v2, Vector2::new(0.0, 1.0), Vector2::new(2.0, 1.0), 1e-5);
/// assert_eq!(intr, SegIntr::NoIntersect);
/// ```
pub fn seg_seg_intr<T>(
    v1: Vector2<T>,
    v2: Vector2<T>,
    u1: Vector2<T>,
    u2: Vector2<T>,
    epsilon: T,
) -> SegIntr<T>
where
    T: Real,
{
    use SegIntr::*;

    // quick reject on fuzzy bounding boxes
    let fuzz = epsilon;
    if num_traits::real::Real::max(v1.x, v2.x) + fuzz < num_traits::real::Real::min(u1.x, u2.x)
        || num_traits::real::Real::max(u1.x, u2.x) + fuzz < num_traits::real::Real::min(v1.x, v2.x)
        || num_traits::real::Real::max(v1.y, v2.y) + fuzz < num_traits::real::Real::min(u1.y, u2.y)
        || num_traits::real::Real::max(u1.y, u2.y) + fuzz < num_traits::real::Real::min(v1.y, v2.y)
    {
        return NoIntersect;
    }

    let mut contacts: [Vector2<T>; 4] = [Vector2::zero(); 4];
    let mut contact_count = 0;
    let mut add_contact = |p: Vector2<T>| {
        if contacts[..contact_count]
            .iter()
            .any(|c| c.fuzzy_eq_eps(p, epsilon))
        {
            return;
        }
        contacts[contact_count] = p;
        contact_count += 1;
    };

    for &p in &[v1, v2] {
        if point_on_segment_eps(u1, u2, p, epsilon) {
            add_contact(p);
        }
    }
    for &p in &[u1, u2] {
        if point_on_segment_eps(v1, v2, p, epsilon) {
            add_contact(p);
        }
    }

    match contact_count {
        0 => {}
        1 => return OneIntersect { point: contacts[0] },
        _ => {
            // more than two distinct contacts only happens with near degenerate input
            let (point1, point2) = farthest_pair(&contacts[..contact_count]);
            return Overlapping { point1, point2 };
        }
    }

    let o1 = orient2d(v1, v2, u1);
    let o2 = orient2d(v1, v2, u2);
    let o3 = orient2d(u1, u2, v1);
    let o4 = orient2d(u1, u2, v2);

    let straddles = |a: Orientation, b: Orientation| a.sign() * b.sign() < 0;
    if !straddles(o1, o2) || !straddles(o3, o4) {
        return NoIntersect;
    }

    // proper crossing, parametric solution using perpendicular dot products
    // http://geomalgorithms.com/a05-_intersect-1.html
    let v = v2 - v1;
    let u = u2 - u1;
    let w = v1 - u1;
    let v_pdot_u = v.perp_dot(u);
    let t = u.perp_dot(w) / v_pdot_u;
    let t = num_traits::real::Real::min(num_traits::real::Real::max(t, T::zero()), T::one());

    OneIntersect {
        point: point_from_parametric(v1, v2, t),
    }
}

/// Exact variant of [seg_seg_intr] with no tolerance, every contact (touching included) is decided
/// with [orient2d].
///
/// Contact points at endpoints are returned exactly; a proper crossing point is computed in
/// floating point.
///
/// # Examples
///
/// ```
/// # use polyclip::core::math::*;
/// let v1 = Vector2::new(0.0, 0.0);
/// let v2 = Vector2::new(2.0, 0.0);
/// // touching at an interior point of the first segment
/// let intr = seg_seg_intr_exact(v1, v2, Vector2::new(1.0, 0.0), Vector2::new(1.0, 1.0));
/// assert_eq!(intr, SegIntr::OneIntersect { point: Vector2::new(1.0, 0.0) });
/// // no tolerance, a gap of 1e-12 is a miss
/// let intr = seg_seg_intr_exact(v1, v2, Vector2::new(1.0, 1e-12), Vector2::new(1.0, 1.0));
/// assert_eq!(intr, SegIntr::NoIntersect);
/// ```
pub fn seg_seg_intr_exact<T>(
    v1: Vector2<T>,
    v2: Vector2<T>,
    u1: Vector2<T>,
    u2: Vector2<T>,
) -> SegIntr<T>
where
    T: Real,
{
    use SegIntr::*;

    let o1 = orient2d(v1, v2, u1);
    let o2 = orient2d(v1, v2, u2);
    let o3 = orient2d(u1, u2, v1);
    let o4 = orient2d(u1, u2, v2);

    if o1 == Orientation::Collinear && o2 == Orientation::Collinear {
        // all four points on one line, collect endpoints lying inside the other segment
        let mut contacts: [Vector2<T>; 4] = [Vector2::zero(); 4];
        let mut contact_count = 0;
        let mut add_contact = |p: Vector2<T>| {
            if !contacts[..contact_count].contains(&p) {
                contacts[contact_count] = p;
                contact_count += 1;
            }
        };

        for &(p, s1, s2) in &[(u1, v1, v2), (u2, v1, v2), (v1, u1, u2), (v2, u1, u2)] {
            if within_box(s1, s2, p) {
                add_contact(p);
            }
        }

        return match contact_count {
            0 => NoIntersect,
            1 => OneIntersect { point: contacts[0] },
            _ => {
                let (point1, point2) = farthest_pair(&contacts[..contact_count]);
                Overlapping { point1, point2 }
            }
        };
    }

    if o1.sign() * o2.sign() > 0 || o3.sign() * o4.sign() > 0 {
        return NoIntersect;
    }

    // touching at an endpoint
    if o1 == Orientation::Collinear {
        return OneIntersect { point: u1 };
    }
    if o2 == Orientation::Collinear {
        return OneIntersect { point: u2 };
    }
    if o3 == Orientation::Collinear {
        return OneIntersect { point: v1 };
    }
    if o4 == Orientation::Collinear {
        return OneIntersect { point: v2 };
    }

    let v = v2 - v1;
    let u = u2 - u1;
    let w = v1 - u1;
    let t = u.perp_dot(w) / v.perp_dot(u);
    let t = num_traits::real::Real::min(num_traits::real::Real::max(t, T::zero()), T::one());
    OneIntersect {
        point: point_from_parametric(v1, v2, t),
    }
}

/// Pair of points furthest apart, ties keep the earliest pair. Requires at least 2 points.
fn farthest_pair<T>(points: &[Vector2<T>]) -> (Vector2<T>, Vector2<T>)
where
    T: Real,
{
    let mut best = (points[0], points[1]);
    let mut best_dist = dist_squared(points[0], points[1]);
    for (i, &p) in points.iter().enumerate() {
        for &q in &points[(i + 1)..] {
            let d = dist_squared(p, q);
            if d > best_dist {
                best_dist = d;
                best = (p, q);
            }
        }
    }
    best
}

/// `true` if `p` lies in the closed bounding box of `s1` and `s2` (exact for collinear points).
#[inline]
fn within_box<T>(s1: Vector2<T>, s2: Vector2<T>, p: Vector2<T>) -> bool
where
    T: Real,
{
    let (min_x, max_x) = min_max(s1.x, s2.x);
    let (min_y, max_y) = min_max(s1.y, s2.y);
    p.x >= min_x && p.x <= max_x && p.y >= min_y && p.y <= max_y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::vec2;

    #[test]
    fn exact_crossing_and_touching() {
        let intr = seg_seg_intr_exact(
            vec2(0.0, 0.0),
            vec2(2.0, 2.0),
            vec2(0.0, 2.0),
            vec2(2.0, 0.0),
        );
        assert_eq!(intr, SegIntr::OneIntersect { point: vec2(1.0, 1.0) });

        let intr = seg_seg_intr_exact(
            vec2(0.0, 0.0),
            vec2(2.0, 0.0),
            vec2(2.0, 0.0),
            vec2(3.0, 1.0),
        );
        assert_eq!(intr, SegIntr::OneIntersect { point: vec2(2.0, 0.0) });

        let intr = seg_seg_intr_exact(
            vec2(0.0, 0.0),
            vec2(2.0, 0.0),
            vec2(3.0, 0.0),
            vec2(3.0, 1.0),
        );
        assert_eq!(intr, SegIntr::NoIntersect);
    }

    #[test]
    fn exact_collinear_cases() {
        let intr = seg_seg_intr_exact(
            vec2(0.0, 0.0),
            vec2(4.0, 0.0),
            vec2(1.0, 0.0),
            vec2(2.0, 0.0),
        );
        assert_eq!(
            intr,
            SegIntr::Overlapping {
                point1: vec2(1.0, 0.0),
                point2: vec2(2.0, 0.0)
            }
        );

        let intr = seg_seg_intr_exact(
            vec2(0.0, 0.0),
            vec2(1.0, 0.0),
            vec2(1.0, 0.0),
            vec2(2.0, 0.0),
        );
        assert_eq!(intr, SegIntr::OneIntersect { point: vec2(1.0, 0.0) });

        let intr = seg_seg_intr_exact(
            vec2(0.0, 0.0),
            vec2(1.0, 0.0),
            vec2(1.5, 0.0),
            vec2(2.0, 0.0),
        );
        assert_eq!(intr, SegIntr::NoIntersect);
    }

    const EPS: f64 = 1e-5;

    fn assert_one(intr: SegIntr<f64>, expected: Vector2<f64>) {
        match intr {
            SegIntr::OneIntersect { point } => assert!(
                point.fuzzy_eq(expected),
                "expected {:?}, got {:?}",
                expected,
                point
            ),
            _ => panic!("expected one intersect, got {:?}", intr),
        }
    }

    #[test]
    fn crossing_diagonals() {
        let intr = seg_seg_intr(
            vec2(0.0, 0.0),
            vec2(2.0, 2.0),
            vec2(0.0, 2.0),
            vec2(2.0, 0.0),
            EPS,
        );
        assert_one(intr, vec2(1.0, 1.0));
    }

    #[test]
    fn shared_endpoint() {
        let intr = seg_seg_intr(
            vec2(0.0, 0.0),
            vec2(1.0, 0.0),
            vec2(1.0, 0.0),
            vec2(1.0, 5.0),
            EPS,
        );
        assert_eq!(intr, SegIntr::OneIntersect { point: vec2(1.0, 0.0) });
    }

    #[test]
    fn t_junction_reports_the_touching_endpoint() {
        let intr = seg_seg_intr(
            vec2(0.0, 0.0),
            vec2(4.0, 0.0),
            vec2(2.0, 0.0),
            vec2(2.0, 3.0),
            EPS,
        );
        assert_eq!(intr, SegIntr::OneIntersect { point: vec2(2.0, 0.0) });
    }

    #[test]
    fn near_touch_within_epsilon() {
        let intr = seg_seg_intr(
            vec2(0.0, 0.0),
            vec2(4.0, 0.0),
            vec2(2.0, 1e-7),
            vec2(2.0, 3.0),
            EPS,
        );
        assert_eq!(intr, SegIntr::OneIntersect { point: vec2(2.0, 1e-7) });
    }

    #[test]
    fn collinear_overlap_is_reported_by_end_points() {
        let intr = seg_seg_intr(
            vec2(0.0, 0.0),
            vec2(4.0, 0.0),
            vec2(6.0, 0.0),
            vec2(1.0, 0.0),
            EPS,
        );
        match intr {
            SegIntr::Overlapping { point1, point2 } => {
                let (a, b) = if point1.x < point2.x {
                    (point1, point2)
                } else {
                    (point2, point1)
                };
                assert!(a.fuzzy_eq(vec2(1.0, 0.0)));
                assert!(b.fuzzy_eq(vec2(4.0, 0.0)));
            }
            _ => panic!("expected overlap, got {:?}", intr),
        }
    }

    #[test]
    fn collinear_end_to_end_touch() {
        let intr = seg_seg_intr(
            vec2(0.0, 0.0),
            vec2(1.0, 0.0),
            vec2(1.0, 0.0),
            vec2(3.0, 0.0),
            EPS,
        );
        assert_eq!(intr, SegIntr::OneIntersect { point: vec2(1.0, 0.0) });
    }

    #[test]
    fn collinear_apart() {
        let intr = seg_seg_intr(
            vec2(0.0, 0.0),
            vec2(1.0, 0.0),
            vec2(2.0, 0.0),
            vec2(3.0, 0.0),
            EPS,
        );
        assert_eq!(intr, SegIntr::NoIntersect);
    }

    #[test]
    fn lines_cross_outside_segments() {
        let intr = seg_seg_intr(
            vec2(0.0, 0.0),
            vec2(1.0, 0.0),
            vec2(2.0, -1.0),
            vec2(2.0, 1.0),
            EPS,
        );
        assert_eq!(intr, SegIntr::NoIntersect);
    }
}
