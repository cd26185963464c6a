use super::FuzzyEq;
use static_aabb2d_index::IndexableNum;

/// Scalar type for coordinates: a real number that can be fuzzy compared, used as a spatial index
/// key, and checked for finiteness.
pub trait Real:
    num_traits::real::Real
    + num_traits::Bounded
    + FuzzyEq
    + std::default::Default
    + std::fmt::Debug
    + IndexableNum
    + Send
    + Sync
    + 'static
{
    /// `true` if the value is neither infinite nor NaN.
    fn is_finite_value(self) -> bool;

    /// Unit roundoff (half of the machine epsilon), the relative error bound of one rounded
    /// arithmetic operation.
    fn unit_roundoff() -> Self;

    #[inline]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    #[inline]
    fn half() -> Self {
        Self::one() / Self::two()
    }
}

impl Real for f32 {
    #[inline]
    fn is_finite_value(self) -> bool {
        f32::is_finite(self)
    }

    #[inline]
    fn unit_roundoff() -> Self {
        f32::EPSILON * 0.5
    }

    #[inline]
    fn two() -> Self {
        2.0f32
    }

    #[inline]
    fn half() -> Self {
        0.5f32
    }
}

impl Real for f64 {
    #[inline]
    fn is_finite_value(self) -> bool {
        f64::is_finite(self)
    }

    #[inline]
    fn unit_roundoff() -> Self {
        f64::EPSILON * 0.5
    }

    #[inline]
    fn two() -> Self {
        2.0f64
    }

    #[inline]
    fn half() -> Self {
        0.5f64
    }
}
