use super::Vector2;
use crate::core::traits::Real;

/// Returns the (min, max) values from `v1` and `v2`.
///
/// # Examples
///
/// ```
/// # use polyclip::core::math::*;
/// assert_eq!(min_max(8, 4), (4, 8));
/// ```
#[inline]
pub fn min_max<T>(v1: T, v2: T) -> (T, T)
where
    T: PartialOrd,
{
    if v1 < v2 {
        (v1, v2)
    } else {
        (v2, v1)
    }
}

/// Distance squared between the points `p0` and `p1`.
#[inline]
pub fn dist_squared<T>(p0: Vector2<T>, p1: Vector2<T>) -> T
where
    T: Real,
{
    let d = p0 - p1;
    d.dot(d)
}

/// Midpoint of the line segment `p0` to `p1`.
#[inline]
pub fn midpoint<T>(p0: Vector2<T>, p1: Vector2<T>) -> Vector2<T>
where
    T: Real,
{
    Vector2::new((p0.x + p1.x) * T::half(), (p0.y + p1.y) * T::half())
}

/// Point on the segment `p0` to `p1` at parametric value `t`.
#[inline]
pub fn point_from_parametric<T>(p0: Vector2<T>, p1: Vector2<T>, t: T) -> Vector2<T>
where
    T: Real,
{
    p0 + (p1 - p0).scale(t)
}

/// Parametric value of the projection of `point` onto the line through `p0` and `p1`.
///
/// Unlike a coordinate ratio this is well defined for vertical and horizontal segments, and for
/// points slightly off the line. A zero length segment returns 0.
///
/// # Examples
///
/// ```
/// # use polyclip::core::math::*;
/// let p0 = Vector2::new(0.0, 0.0);
/// let p1 = Vector2::new(0.0, 4.0);
/// assert_eq!(parametric_from_point(p0, p1, Vector2::new(0.1, 1.0)), 0.25);
/// ```
#[inline]
pub fn parametric_from_point<T>(p0: Vector2<T>, p1: Vector2<T>, point: Vector2<T>) -> T
where
    T: Real,
{
    let v = p1 - p0;
    let len2 = v.length_squared();
    if len2 == T::zero() {
        return T::zero();
    }
    (point - p0).dot(v) / len2
}

/// Returns the closest point on the line segment from `p0` to `p1` to the `point` given.
#[inline]
pub fn line_seg_closest_point<T>(p0: Vector2<T>, p1: Vector2<T>, point: Vector2<T>) -> Vector2<T>
where
    T: Real,
{
    let v = p1 - p0;
    let w = point - p0;
    let c1 = w.dot(v);
    if c1 <= T::zero() {
        return p0;
    }

    let c2 = v.length_squared();
    if c2 <= c1 {
        return p1;
    }

    p0 + v.scale(c1 / c2)
}

/// `true` if `point` is within `epsilon` of the segment `p0` to `p1` (distance measured to the
/// closest point on the segment).
#[inline]
pub fn point_on_segment_eps<T>(
    p0: Vector2<T>,
    p1: Vector2<T>,
    point: Vector2<T>,
    epsilon: T,
) -> bool
where
    T: Real,
{
    dist_squared(line_seg_closest_point(p0, p1, point), point) < epsilon * epsilon
}

/// Angle of the direction vector described by `p0` to `p1`.
#[inline]
pub fn angle<T>(p0: Vector2<T>, p1: Vector2<T>) -> T
where
    T: Real,
{
    T::atan2(p1.y - p0.y, p1.x - p0.x)
}

/// Clockwise sweep going from the direction `from` to the direction `to`, in `(0, 2PI]`.
///
/// A zero sweep (same direction) maps to a full turn so that going straight back along the
/// reference direction always sorts last.
#[inline]
pub fn clockwise_sweep<T>(from: T, to: T) -> T
where
    T: Real,
{
    let tau = T::from(std::f64::consts::TAU).unwrap();
    let mut sweep = from - to;
    while sweep <= T::zero() {
        sweep = sweep + tau;
    }
    while sweep > tau {
        sweep = sweep - tau;
    }
    sweep
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::vec2;
    use crate::core::traits::FuzzyEq;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    #[test]
    fn closest_point_clamps_to_segment() {
        let p0 = vec2(0.0, 0.0);
        let p1 = vec2(2.0, 0.0);
        assert!(line_seg_closest_point(p0, p1, vec2(-1.0, 1.0)).fuzzy_eq(p0));
        assert!(line_seg_closest_point(p0, p1, vec2(3.0, 1.0)).fuzzy_eq(p1));
        assert!(line_seg_closest_point(p0, p1, vec2(1.0, 1.0)).fuzzy_eq(vec2(1.0, 0.0)));
    }

    #[test]
    fn point_on_segment_with_tolerance() {
        let p0 = vec2(0.0, 0.0);
        let p1 = vec2(2.0, 0.0);
        assert!(point_on_segment_eps(p0, p1, vec2(1.0, 1e-7), 1e-5));
        assert!(!point_on_segment_eps(p0, p1, vec2(1.0, 1e-3), 1e-5));
        assert!(!point_on_segment_eps(p0, p1, vec2(2.1, 0.0), 1e-5));
    }

    #[test]
    fn clockwise_sweep_range() {
        assert!(clockwise_sweep(FRAC_PI_2, 0.0).fuzzy_eq(FRAC_PI_2));
        assert!(clockwise_sweep(0.0, FRAC_PI_2).fuzzy_eq(3.0 * FRAC_PI_2));
        assert!(clockwise_sweep(PI, PI).fuzzy_eq(TAU));
        assert!(clockwise_sweep(-PI, PI).fuzzy_eq(TAU));
    }
}
