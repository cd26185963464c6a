/// Tolerance based equality for the scalar type used by the geometry.
///
/// Positions produced by intersection arithmetic almost never compare exactly equal, every "same
/// position" decision in the crate goes through this trait so one epsilon governs all of them.
///
/// # Examples
///
/// ```
/// # use polyclip::core::traits::*;
/// let a = 0.1 + 0.2;
/// assert_ne!(a, 0.3);
/// assert!(a.fuzzy_eq(0.3));
/// assert!(1e-12f64.fuzzy_eq_zero());
/// assert!(!1.0f64.fuzzy_eq_eps(1.1, 0.01));
/// ```
pub trait FuzzyEq: Sized + Copy {
    /// Epsilon used by [FuzzyEq::fuzzy_eq] and [FuzzyEq::fuzzy_eq_zero].
    fn fuzzy_epsilon() -> Self;

    /// `true` if `|self - other| < fuzzy_epsilon`.
    fn fuzzy_eq_eps(&self, other: Self, fuzzy_epsilon: Self) -> bool;

    #[inline]
    fn fuzzy_eq(&self, other: Self) -> bool {
        self.fuzzy_eq_eps(other, Self::fuzzy_epsilon())
    }

    /// `true` if `|self| < fuzzy_epsilon`.
    fn fuzzy_eq_zero_eps(&self, fuzzy_epsilon: Self) -> bool;

    #[inline]
    fn fuzzy_eq_zero(&self) -> bool {
        self.fuzzy_eq_zero_eps(Self::fuzzy_epsilon())
    }
}

macro_rules! impl_fuzzy {
    ($ty:ty, $eps:expr) => {
        impl FuzzyEq for $ty {
            #[inline]
            fn fuzzy_epsilon() -> Self {
                $eps
            }

            #[inline]
            fn fuzzy_eq_eps(&self, other: Self, fuzzy_epsilon: Self) -> bool {
                (*self - other).abs() < fuzzy_epsilon
            }

            #[inline]
            fn fuzzy_eq_zero_eps(&self, fuzzy_epsilon: Self) -> bool {
                self.abs() < fuzzy_epsilon
            }
        }
    };
}

impl_fuzzy!(f32, 1.0e-6);
impl_fuzzy!(f64, 1.0e-9);
