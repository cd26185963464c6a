use crate::core::{
    math::{dist_squared, min_max, orient2d, seg_seg_intr_exact, Orientation, SegIntr, Vector2},
    traits::{ControlFlow, Real},
    Control,
};
use static_aabb2d_index as aabb_index;
use static_aabb2d_index::{
    StaticAABB2DIndex, StaticAABB2DIndexBuildError, StaticAABB2DIndexBuilder, AABB,
};
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Point type used for polygon vertexes.
pub type Point<T = f64> = Vector2<T>;

/// Closed sequence of vertexes, the last vertex connects back to the first (the closing vertex is
/// not repeated).
///
/// The vertexes are fixed at construction. Construction performs no checks, use
/// [validate](super::validate) to check the structural requirements.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimplePolygon<T = f64> {
    vertexes: Vec<Point<T>>,
}

/// Self intersect found while scanning a polygon, edges are identified by their start vertex
/// index.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SelfIntersect<T> {
    /// Edges touch or cross at a single point (`start_index1 == start_index2` marks a zero length
    /// edge).
    Basic {
        start_index1: usize,
        start_index2: usize,
        point: Point<T>,
    },
    /// Edges share a portion of their length.
    Overlapping {
        start_index1: usize,
        start_index2: usize,
        point1: Point<T>,
        point2: Point<T>,
    },
}

/// Trait for visiting polygon self intersects.
pub trait SelfIntersectVisitor<T, C>
where
    T: Real,
    C: ControlFlow,
{
    fn visit_intr(&mut self, intr: SelfIntersect<T>) -> C;
}

impl<T, C, F> SelfIntersectVisitor<T, C> for F
where
    T: Real,
    C: ControlFlow,
    F: FnMut(SelfIntersect<T>) -> C,
{
    #[inline]
    fn visit_intr(&mut self, intr: SelfIntersect<T>) -> C {
        self(intr)
    }
}

impl<T> SimplePolygon<T>
where
    T: Real,
{
    /// Create a polygon from its vertexes.
    #[inline]
    pub fn new(vertexes: Vec<Point<T>>) -> Self {
        Self { vertexes }
    }

    /// Create an empty polygon (no vertexes).
    #[inline]
    pub fn empty() -> Self {
        Self {
            vertexes: Vec::new(),
        }
    }

    #[inline]
    pub fn vertexes(&self) -> &[Point<T>] {
        &self.vertexes
    }

    #[inline]
    pub fn into_vertexes(self) -> Vec<Point<T>> {
        self.vertexes
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertexes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertexes.is_empty()
    }

    /// Index of the vertex after `i`, wrapping to 0 at the end.
    #[inline]
    pub fn next_wrapping_index(&self, i: usize) -> usize {
        let next = i + 1;
        if next >= self.vertexes.len() {
            0
        } else {
            next
        }
    }

    /// Index of the vertex before `i`, wrapping to the last vertex at 0.
    #[inline]
    pub fn prev_wrapping_index(&self, i: usize) -> usize {
        if i == 0 {
            self.vertexes.len() - 1
        } else {
            i - 1
        }
    }

    /// Iterate the edges as (start, end) vertex pairs, including the closing edge.
    pub fn iter_segments(&self) -> impl Iterator<Item = (Point<T>, Point<T>)> + '_ {
        let n = self.vertexes.len();
        let count = if n < 2 { 0 } else { n };
        (0..count).map(move |i| (self.vertexes[i], self.vertexes[(i + 1) % n]))
    }

    /// Signed area using the shoelace formula, positive if counter clockwise.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polyclip::polygon;
    /// # use polyclip::polygon::*;
    /// let square: SimplePolygon = polygon![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)];
    /// assert_eq!(square.area(), 4.0);
    /// assert_eq!(square.reversed().area(), -4.0);
    /// ```
    pub fn area(&self) -> T {
        let double_area = self
            .iter_segments()
            .fold(T::zero(), |acc, (v1, v2)| acc + v1.x * v2.y - v1.y * v2.x);
        double_area / T::two()
    }

    /// Direction of the boundary from the sign of the area, `Collinear` if the area is zero.
    pub fn orientation(&self) -> Orientation {
        let a = self.area();
        if a > T::zero() {
            Orientation::CounterClockwise
        } else if a < T::zero() {
            Orientation::Clockwise
        } else {
            Orientation::Collinear
        }
    }

    /// Total length of all edges (closing edge included).
    pub fn perimeter(&self) -> T {
        self.iter_segments()
            .fold(T::zero(), |acc, (v1, v2)| acc + (v2 - v1).length())
    }

    /// Axis aligned bounding box of the vertexes, `None` if the polygon is empty.
    pub fn extents(&self) -> Option<AABB<T>> {
        let first = self.vertexes.first()?;
        let mut result = AABB::new(first.x, first.y, first.x, first.y);
        for v in self.vertexes.iter().skip(1) {
            result.min_x = num_traits::real::Real::min(result.min_x, v.x);
            result.min_y = num_traits::real::Real::min(result.min_y, v.y);
            result.max_x = num_traits::real::Real::max(result.max_x, v.x);
            result.max_y = num_traits::real::Real::max(result.max_y, v.y);
        }

        Some(result)
    }

    /// Winding number of the boundary around `point`.
    ///
    /// Non zero means `point` is inside. Points exactly on the boundary give an unspecified result
    /// (either inside or outside). Crossing tests use the exact [orient2d] predicate.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polyclip::polygon;
    /// # use polyclip::polygon::*;
    /// # use polyclip::core::math::*;
    /// let square: SimplePolygon = polygon![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)];
    /// assert_eq!(square.winding_number(Vector2::new(1.0, 1.0)), 1);
    /// assert_eq!(square.reversed().winding_number(Vector2::new(1.0, 1.0)), -1);
    /// assert_eq!(square.winding_number(Vector2::new(3.0, 1.0)), 0);
    /// ```
    pub fn winding_number(&self, point: Point<T>) -> i32 {
        let mut winding = 0;
        for (v1, v2) in self.iter_segments() {
            if v1.y <= point.y {
                if v2.y > point.y && orient2d(v1, v2, point) == Orientation::CounterClockwise {
                    // upward crossing with point on the left
                    winding += 1;
                }
            } else if v2.y <= point.y && orient2d(v1, v2, point) == Orientation::Clockwise {
                // downward crossing with point on the right
                winding -= 1;
            }
        }

        winding
    }

    /// Creates a spatial index of all the edges, the key of each box is the edge start vertex
    /// index.
    ///
    /// # Panics
    ///
    /// Panics if `T` fails to cast to/from a `u16` (required by the spatial index).
    pub fn create_aabb_index(&self) -> StaticAABB2DIndex<T> {
        let n = self.vertexes.len();
        if n < 2 {
            return unwrap_spatial_index(StaticAABB2DIndexBuilder::new(0));
        }

        let mut builder = StaticAABB2DIndexBuilder::new(n);
        for (v1, v2) in self.iter_segments() {
            let (min_x, max_x) = min_max(v1.x, v2.x);
            let (min_y, max_y) = min_max(v1.y, v2.y);
            builder.add(min_x, min_y, max_x, max_y);
        }

        unwrap_spatial_index(builder)
    }

    /// Copy of the polygon with the vertex order reversed (first vertex kept first).
    pub fn reversed(&self) -> Self {
        let mut vertexes = Vec::with_capacity(self.vertexes.len());
        if let Some(&first) = self.vertexes.first() {
            vertexes.push(first);
            vertexes.extend(self.vertexes[1..].iter().rev().copied());
        }
        Self { vertexes }
    }

    /// `true` if both polygons describe the same closed boundary within `eps`, regardless of the
    /// starting vertex and direction.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polyclip::polygon;
    /// # use polyclip::polygon::*;
    /// let a: SimplePolygon = polygon![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)];
    /// let b: SimplePolygon = polygon![(1.0, 1.0), (1.0, 0.0), (0.0, 0.0)];
    /// assert!(a.fuzzy_eq_cyclic(&b, 1e-9));
    /// ```
    pub fn fuzzy_eq_cyclic(&self, other: &Self, eps: T) -> bool {
        let n = self.vertexes.len();
        if n != other.vertexes.len() {
            return false;
        }
        if n == 0 {
            return true;
        }

        let a = &self.vertexes;
        let b = &other.vertexes;
        (0..n).any(|offset| {
            let forward = (0..n).all(|i| a[i].fuzzy_eq_eps(b[(i + offset) % n], eps));
            let backward = || (0..n).all(|i| a[i].fuzzy_eq_eps(b[(offset + n - i) % n], eps));
            forward || backward()
        })
    }

    /// Visit all self intersects of the polygon with exact tests: zero length edges, adjacent
    /// edges folding back over each other, and any contact between non adjacent edges.
    ///
    /// # Panics
    ///
    /// Panics if `T` fails to cast to/from a `u16` (required by the spatial index).
    pub fn visit_self_intersects<C, V>(&self, visitor: &mut V) -> C
    where
        C: ControlFlow,
        V: SelfIntersectVisitor<T, C>,
    {
        try_cf!(self.visit_local_self_intersects(visitor));
        self.visit_global_self_intersects(visitor)
    }

    /// `true` if the polygon has any self intersect (see [SimplePolygon::visit_self_intersects]).
    ///
    /// # Examples
    ///
    /// ```
    /// # use polyclip::polygon;
    /// # use polyclip::polygon::*;
    /// let bowtie: SimplePolygon = polygon![(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)];
    /// assert!(bowtie.scan_for_self_intersect());
    /// let square: SimplePolygon = polygon![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)];
    /// assert!(!square.scan_for_self_intersect());
    /// ```
    pub fn scan_for_self_intersect(&self) -> bool {
        let mut found = false;
        self.visit_self_intersects(&mut |_intr: SelfIntersect<T>| {
            found = true;
            Control::Break(())
        });
        found
    }

    /// Intersects between edges sharing a vertex.
    fn visit_local_self_intersects<C, V>(&self, visitor: &mut V) -> C
    where
        C: ControlFlow,
        V: SelfIntersectVisitor<T, C>,
    {
        let n = self.vertexes.len();
        if n < 2 {
            return C::continuing();
        }

        for i in 0..n {
            let j = self.next_wrapping_index(i);
            let v1 = self.vertexes[i];
            let v2 = self.vertexes[j];
            if v1 == v2 {
                try_cf!(visitor.visit_intr(SelfIntersect::Basic {
                    start_index1: i,
                    start_index2: i,
                    point: v1,
                }));
                continue;
            }

            if n < 3 {
                continue;
            }

            // next edge folding back over this one
            let k = self.next_wrapping_index(j);
            let v3 = self.vertexes[k];
            if v3 != v2
                && orient2d(v1, v2, v3) == Orientation::Collinear
                && (v1 - v2).dot(v3 - v2) > T::zero()
            {
                let end = if dist_squared(v1, v2) < dist_squared(v3, v2) {
                    v1
                } else {
                    v3
                };
                try_cf!(visitor.visit_intr(SelfIntersect::Overlapping {
                    start_index1: i,
                    start_index2: j,
                    point1: v2,
                    point2: end,
                }));
            }
        }

        C::continuing()
    }

    /// Intersects between edges that do not share a vertex, found through the spatial index.
    fn visit_global_self_intersects<C, V>(&self, visitor: &mut V) -> C
    where
        C: ControlFlow,
        V: SelfIntersectVisitor<T, C>,
    {
        let n = self.vertexes.len();
        if n < 4 {
            return C::continuing();
        }

        let index = self.create_aabb_index();
        let mut query_stack = Vec::with_capacity(8);
        let fuzz = T::fuzzy_epsilon();

        let mut cf = C::continuing();
        for i in 0..n {
            let j = self.next_wrapping_index(i);
            let v1 = self.vertexes[i];
            let v2 = self.vertexes[j];
            let (min_x, max_x) = min_max(v1.x, v2.x);
            let (min_y, max_y) = min_max(v1.y, v2.y);

            let mut query_visitor = |hit_i: usize| {
                // visit each pair once, skip edges sharing a vertex
                if hit_i <= i {
                    return aabb_index::Control::Continue;
                }
                let hit_j = self.next_wrapping_index(hit_i);
                if hit_i == j || hit_j == i {
                    return aabb_index::Control::Continue;
                }

                let u1 = self.vertexes[hit_i];
                let u2 = self.vertexes[hit_j];
                let intr = match seg_seg_intr_exact(v1, v2, u1, u2) {
                    SegIntr::NoIntersect => return aabb_index::Control::Continue,
                    SegIntr::OneIntersect { point } => SelfIntersect::Basic {
                        start_index1: i,
                        start_index2: hit_i,
                        point,
                    },
                    SegIntr::Overlapping { point1, point2 } => SelfIntersect::Overlapping {
                        start_index1: i,
                        start_index2: hit_i,
                        point1,
                        point2,
                    },
                };

                cf = visitor.visit_intr(intr);
                if cf.should_break() {
                    return aabb_index::Control::Break(());
                }

                aabb_index::Control::Continue
            };

            index.visit_query_with_stack(
                min_x - fuzz,
                min_y - fuzz,
                max_x + fuzz,
                max_y + fuzz,
                &mut query_visitor,
                &mut query_stack,
            );

            if cf.should_break() {
                break;
            }
        }

        cf
    }
}

impl<T> Index<usize> for SimplePolygon<T> {
    type Output = Point<T>;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.vertexes[index]
    }
}

impl<T> FromIterator<Point<T>> for SimplePolygon<T>
where
    T: Real,
{
    fn from_iter<I: IntoIterator<Item = Point<T>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> From<Vec<Point<T>>> for SimplePolygon<T>
where
    T: Real,
{
    #[inline]
    fn from(vertexes: Vec<Point<T>>) -> Self {
        Self::new(vertexes)
    }
}

/// Helper function to unwrap a spatial index from a builder or panic for the unexpected case of
/// failure.
pub(crate) fn unwrap_spatial_index<T>(builder: StaticAABB2DIndexBuilder<T>) -> StaticAABB2DIndex<T>
where
    T: Real,
{
    match builder.build() {
        Ok(x) => x,
        Err(e) => match e {
            StaticAABB2DIndexBuildError::ItemCountError { .. } => {
                unreachable!("internal library error: count mismatch when building spatial index")
            }
            StaticAABB2DIndexBuildError::NumericCastError => {
                panic!("failed to cast coordinate type: {e}")
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::FuzzyEq;

    fn square(size: f64) -> SimplePolygon {
        polygon![(0.0, 0.0), (size, 0.0), (size, size), (0.0, size)]
    }

    #[test]
    fn measures() {
        let sq = square(3.0);
        assert_fuzzy_eq!(sq.area(), 9.0);
        assert_fuzzy_eq!(sq.perimeter(), 12.0);
        assert_eq!(sq.orientation(), Orientation::CounterClockwise);
        assert_eq!(sq.reversed().orientation(), Orientation::Clockwise);
        let ext = sq.extents().unwrap();
        assert_eq!((ext.min_x, ext.min_y, ext.max_x, ext.max_y), (0.0, 0.0, 3.0, 3.0));
        assert!(SimplePolygon::<f64>::empty().extents().is_none());
    }

    #[test]
    fn reversed_keeps_first_vertex() {
        let sq = square(1.0).reversed();
        assert_eq!(sq[0], Vector2::new(0.0, 0.0));
        assert_eq!(sq[1], Vector2::new(0.0, 1.0));
        assert_eq!(sq[3], Vector2::new(1.0, 0.0));
    }

    #[test]
    fn cyclic_equality() {
        let a = square(1.0);
        let shifted: SimplePolygon = polygon![(1.0, 1.0), (0.0, 1.0), (0.0, 0.0), (1.0, 0.0)];
        assert!(a.fuzzy_eq_cyclic(&shifted, 1e-9));
        assert!(a.fuzzy_eq_cyclic(&shifted.reversed(), 1e-9));
        assert!(!a.fuzzy_eq_cyclic(&square(2.0), 1e-9));
    }

    #[test]
    fn self_intersect_kinds() {
        let repeated: SimplePolygon = polygon![(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (0.0, 1.0)];
        assert!(repeated.scan_for_self_intersect());

        // spike folding back along the bottom edge
        let fold: SimplePolygon = polygon![(0.0, 0.0), (2.0, 0.0), (1.0, 0.0), (1.0, 1.0)];
        assert!(fold.scan_for_self_intersect());

        // two lobes touching at (1, 1) without crossing
        let touching: SimplePolygon = polygon![
            (0.0, 0.0),
            (2.0, 0.0),
            (1.0, 1.0),
            (2.0, 2.0),
            (0.0, 2.0),
            (1.0, 1.0)
        ];
        assert!(touching.scan_for_self_intersect());

        let mut count = 0;
        let bowtie: SimplePolygon = polygon![(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)];
        bowtie.visit_self_intersects(&mut |intr| {
            count += 1;
            match intr {
                SelfIntersect::Basic { point, .. } => {
                    assert!(point.fuzzy_eq(Vector2::new(1.0, 1.0)));
                }
                SelfIntersect::Overlapping { .. } => panic!("unexpected overlap"),
            }
            Control::<()>::Continue
        });
        assert_eq!(count, 1);

        assert!(!square(1.0).scan_for_self_intersect());
        let concave: SimplePolygon =
            polygon![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (2.0, 1.0), (0.0, 4.0)];
        assert!(!concave.scan_for_self_intersect());
    }

    #[test]
    fn winding_number_of_concave_polygon() {
        let concave: SimplePolygon =
            polygon![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (2.0, 1.0), (0.0, 4.0)];
        assert_eq!(concave.winding_number(Vector2::new(1.0, 1.0)), 1);
        assert_eq!(concave.winding_number(Vector2::new(2.0, 3.0)), 0);
    }
}
