use super::{Point, SimplePolygon};
use crate::core::traits::Real;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Area bounded by one outer boundary with zero or more holes cut out of it.
///
/// Regions produced by the boolean operations have a counter clockwise outer boundary and
/// clockwise holes, each hole lies inside the outer boundary and the holes do not overlap each
/// other. The region with an empty outer boundary ([Region::empty]) stands for "no area".
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Region<T = f64> {
    outer: SimplePolygon<T>,
    holes: Vec<SimplePolygon<T>>,
}

impl<T> Region<T>
where
    T: Real,
{
    #[inline]
    pub fn new(outer: SimplePolygon<T>, holes: Vec<SimplePolygon<T>>) -> Self {
        Self { outer, holes }
    }

    /// Region bounded by `polygon` with no holes.
    #[inline]
    pub fn from_polygon(polygon: SimplePolygon<T>) -> Self {
        Self::new(polygon, Vec::new())
    }

    /// Region holding no area.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polyclip::polygon::*;
    /// let r: Region = Region::empty();
    /// assert!(r.is_empty());
    /// assert_eq!(r.area(), 0.0);
    /// ```
    #[inline]
    pub fn empty() -> Self {
        Self::new(SimplePolygon::empty(), Vec::new())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.outer.is_empty()
    }

    #[inline]
    pub fn outer(&self) -> &SimplePolygon<T> {
        &self.outer
    }

    #[inline]
    pub fn holes(&self) -> &[SimplePolygon<T>] {
        &self.holes
    }

    #[inline]
    pub fn into_parts(self) -> (SimplePolygon<T>, Vec<SimplePolygon<T>>) {
        (self.outer, self.holes)
    }

    /// Outer boundary followed by the holes.
    pub fn boundaries(&self) -> impl Iterator<Item = &SimplePolygon<T>> + '_ {
        std::iter::once(&self.outer).chain(self.holes.iter())
    }

    /// Enclosed area: outer boundary area minus the hole areas, independent of boundary
    /// directions.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polyclip::polygon;
    /// # use polyclip::polygon::*;
    /// let outer = polygon![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)];
    /// let hole = polygon![(1.0, 1.0), (1.0, 2.0), (2.0, 2.0), (2.0, 1.0)];
    /// let r = Region::new(outer, vec![hole]);
    /// assert_eq!(r.area(), 15.0);
    /// ```
    pub fn area(&self) -> T {
        self.holes
            .iter()
            .fold(self.outer.area().abs(), |acc, h| acc - h.area().abs())
    }

    /// Total length of all boundaries.
    pub fn perimeter(&self) -> T {
        self.boundaries()
            .fold(T::zero(), |acc, b| acc + b.perimeter())
    }

    /// `true` if `point` is inside the outer boundary and outside every hole. Points on a boundary
    /// give an unspecified result.
    pub fn contains_point(&self, point: Point<T>) -> bool {
        self.outer.winding_number(point) != 0
            && self.holes.iter().all(|h| h.winding_number(point) == 0)
    }
}

impl<T> From<SimplePolygon<T>> for Region<T>
where
    T: Real,
{
    #[inline]
    fn from(polygon: SimplePolygon<T>) -> Self {
        Region::from_polygon(polygon)
    }
}
