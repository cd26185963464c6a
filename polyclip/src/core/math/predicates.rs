//! Orientation predicate with an exact fallback.
//!
//! The determinant `(a - c) x (b - c)` is first evaluated in plain floating point arithmetic. When
//! its magnitude exceeds the forward error bound of that evaluation the sign is certain and is
//! returned directly. Otherwise the determinant is recomputed exactly as a floating point expansion
//! (a sum of non-overlapping components) built from error free transformations, and the sign of its
//! most significant component is returned. The result is exact as long as no intermediate product
//! overflows or underflows, which holds for coordinates within `1e-140..1e140` in `f64`.

use super::Vector2;
use crate::core::traits::Real;

/// Orientation of an ordered triple of points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Points turn left (positive signed area).
    CounterClockwise,
    /// Points turn right (negative signed area).
    Clockwise,
    /// Points lie on one line.
    Collinear,
}

impl Orientation {
    /// Orientation as `1`, `-1` or `0`.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Orientation::CounterClockwise => 1,
            Orientation::Clockwise => -1,
            Orientation::Collinear => 0,
        }
    }

    #[inline]
    fn from_value<T: Real>(value: T) -> Self {
        if value > T::zero() {
            Orientation::CounterClockwise
        } else if value < T::zero() {
            Orientation::Clockwise
        } else {
            Orientation::Collinear
        }
    }
}

/// Exact orientation of `c` relative to the directed line `a -> b`.
///
/// # Examples
///
/// ```
/// # use polyclip::core::math::*;
/// let a = Vector2::new(0.0, 0.0);
/// let b = Vector2::new(1.0, 0.0);
/// assert_eq!(orient2d(a, b, Vector2::new(0.5, 1.0)), Orientation::CounterClockwise);
/// assert_eq!(orient2d(a, b, Vector2::new(0.5, -1.0)), Orientation::Clockwise);
/// assert_eq!(orient2d(a, b, Vector2::new(7.0, 0.0)), Orientation::Collinear);
///
/// // two ulps above the diagonal
/// let p = Vector2::new(0.5, 0.5);
/// let q = Vector2::new(12.0, 12.0);
/// let r = Vector2::new(24.0, 24.0 + 2.0 * f64::EPSILON * 16.0);
/// assert_eq!(orient2d(p, q, r), Orientation::CounterClockwise);
/// ```
pub fn orient2d<T>(a: Vector2<T>, b: Vector2<T>, c: Vector2<T>) -> Orientation
where
    T: Real,
{
    let det_left = (a.x - c.x) * (b.y - c.y);
    let det_right = (a.y - c.y) * (b.x - c.x);
    let det = det_left - det_right;

    let det_sum = if det_left > T::zero() {
        if det_right <= T::zero() {
            // signs differ so the difference cannot change sign
            return Orientation::from_value(det);
        }
        det_left + det_right
    } else if det_left < T::zero() {
        if det_right >= T::zero() {
            return Orientation::from_value(det);
        }
        -det_left - det_right
    } else {
        return Orientation::from_value(det);
    };

    let u = T::unit_roundoff();
    let three = T::two() + T::one();
    let sixteen = T::two() * T::two() * T::two() * T::two();
    let err_bound = (three + sixteen * u) * u * det_sum;
    if det >= err_bound || -det >= err_bound {
        return Orientation::from_value(det);
    }

    orient2d_exact(a, b, c)
}

/// Returns `true` if the three points lie exactly on one line.
///
/// # Examples
///
/// ```
/// # use polyclip::core::math::*;
/// assert!(are_collinear(Vector2::new(0.0, 0.0), Vector2::new(1.0, 1.0), Vector2::new(3.0, 3.0)));
/// assert!(are_collinear(Vector2::new(0.0, 0.0), Vector2::new(0.0, 0.0), Vector2::new(3.0, 1.0)));
/// assert!(!are_collinear(Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), Vector2::new(0.0, 1.0)));
/// ```
#[inline]
pub fn are_collinear<T>(a: Vector2<T>, b: Vector2<T>, c: Vector2<T>) -> bool
where
    T: Real,
{
    orient2d(a, b, c) == Orientation::Collinear
}

/// `a + b` as a rounded sum and its exact rounding error.
#[inline]
fn two_sum<T: Real>(a: T, b: T) -> (T, T) {
    let x = a + b;
    let b_virtual = x - a;
    let a_virtual = x - b_virtual;
    let b_roundoff = b - b_virtual;
    let a_roundoff = a - a_virtual;
    (x, a_roundoff + b_roundoff)
}

/// `a * b` as a rounded product and its exact rounding error (fused multiply add).
#[inline]
fn two_product<T: Real>(a: T, b: T) -> (T, T) {
    let p = a * b;
    (p, a.mul_add(b, -p))
}

/// Fixed capacity floating point expansion, components are kept non-overlapping and in increasing
/// magnitude order.
struct Expansion<T> {
    components: [T; 17],
    len: usize,
}

impl<T> Expansion<T>
where
    T: Real,
{
    fn new() -> Self {
        Self {
            components: [T::zero(); 17],
            len: 0,
        }
    }

    /// Adds `value` exactly.
    fn grow(&mut self, value: T) {
        let mut q = value;
        for i in 0..self.len {
            let (sum, err) = two_sum(q, self.components[i]);
            self.components[i] = err;
            q = sum;
        }
        self.components[self.len] = q;
        self.len += 1;
    }

    /// Adds the exact product of two 2-component expansions (`a_hi + a_lo`) * (`b_hi + b_lo`),
    /// negated if `negate` is set.
    fn grow_product(&mut self, a: (T, T), b: (T, T), negate: bool) {
        for &x in &[a.0, a.1] {
            for &y in &[b.0, b.1] {
                let (p, e) = two_product(x, y);
                if negate {
                    self.grow(-p);
                    self.grow(-e);
                } else {
                    self.grow(p);
                    self.grow(e);
                }
            }
        }
    }

    fn sign(&self) -> T {
        self.components[..self.len]
            .iter()
            .rev()
            .copied()
            .find(|c| *c != T::zero())
            .unwrap_or_else(T::zero)
    }
}

fn orient2d_exact<T>(a: Vector2<T>, b: Vector2<T>, c: Vector2<T>) -> Orientation
where
    T: Real,
{
    let acx = two_sum(a.x, -c.x);
    let bcy = two_sum(b.y, -c.y);
    let acy = two_sum(a.y, -c.y);
    let bcx = two_sum(b.x, -c.x);

    let mut det = Expansion::new();
    det.grow_product(acx, bcy, false);
    det.grow_product(acy, bcx, true);

    Orientation::from_value(det.sign())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::vec2;

    #[test]
    fn simple_orientations() {
        let a = vec2(0.0, 0.0);
        let b = vec2(4.0, 0.0);
        assert_eq!(orient2d(a, b, vec2(2.0, 3.0)), Orientation::CounterClockwise);
        assert_eq!(orient2d(b, a, vec2(2.0, 3.0)), Orientation::Clockwise);
        assert_eq!(orient2d(a, b, vec2(-2.0, 0.0)), Orientation::Collinear);
    }

    #[test]
    fn exact_matches_filtered_on_easy_input() {
        let pts = [
            vec2(0.0, 0.0),
            vec2(3.5, -1.25),
            vec2(-7.0, 2.0),
            vec2(1e-3, 1e3),
            vec2(10.0, 10.0),
        ];
        for &a in &pts {
            for &b in &pts {
                for &c in &pts {
                    assert_eq!(orient2d(a, b, c), orient2d_exact(a, b, c));
                }
            }
        }
    }

    #[test]
    fn near_collinear_points_on_diagonal() {
        // points nudged by one ulp off the line y = x
        let a = vec2(0.5, 0.5);
        let b = vec2(12.0, 12.0);
        let above = vec2(24.0, 24.0f64.next_up_compat());
        let below = vec2(24.0, 24.0f64.next_down_compat());
        let on = vec2(24.0, 24.0);
        assert_eq!(orient2d(a, b, above), Orientation::CounterClockwise);
        assert_eq!(orient2d(a, b, below), Orientation::Clockwise);
        assert_eq!(orient2d(a, b, on), Orientation::Collinear);
    }

    #[test]
    fn collinear_with_inexact_decimal_coordinates() {
        // 0.1, 0.2, 0.3 are not representable but the three points are still exactly collinear
        // along the x axis
        let a = vec2(0.1, 0.0);
        let b = vec2(0.2, 0.0);
        let c = vec2(0.3, 0.0);
        assert!(are_collinear(a, b, c));
    }

    trait NextFloat {
        fn next_up_compat(self) -> Self;
        fn next_down_compat(self) -> Self;
    }

    impl NextFloat for f64 {
        fn next_up_compat(self) -> Self {
            f64::from_bits(self.to_bits() + 1)
        }
        fn next_down_compat(self) -> Self {
            f64::from_bits(self.to_bits() - 1)
        }
    }
}
