//! Boolean operations between polygons and regions.
//!
//! All operations overlay the boundaries of both operands, classify every piece of boundary
//! against the other operand, keep the pieces that bound the result and trace them back into
//! regions. Positions closer than [BooleanOptions::pos_equal_eps] are treated as equal throughout.
mod classify;
mod graph;
mod trace;

use crate::{
    core::traits::Real,
    polygon::{Region, SimplePolygon},
};
use classify::{classify_edges, select_edges};
use graph::{collect_loops, working_epsilon, Operand, OverlayGraph};
use trace::{assemble_regions, clean_loop, trace_loops};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Boolean operation to apply between two operands.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOp {
    /// Union of the operands.
    Or,
    /// Intersection of the operands.
    And,
    /// First operand with the second removed.
    Not,
}

#[derive(Debug, Clone, Copy)]
pub struct BooleanOptions<T>
where
    T: Real,
{
    /// Fuzzy comparison epsilon used for determining if two positions are equal.
    ///
    /// This is an upper bound. When an operand has an edge, or a gap between a vertex and another
    /// edge of the same boundary, shorter than `16 * pos_equal_eps`, the operation works with a
    /// sixteenth of that length instead, so small valid polygons survive unchanged. For very large
    /// coordinates the tolerance is raised to stay above their rounding error.
    pub pos_equal_eps: T,
}

impl<T> BooleanOptions<T>
where
    T: Real,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            pos_equal_eps: T::from(1e-5).unwrap(),
        }
    }
}

impl<T> Default for BooleanOptions<T>
where
    T: Real,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Boolean operation between two region sets using the options given.
///
/// The regions within each set are expected to have disjoint interiors (they may touch). Boundary
/// orientation of the inputs does not matter. Every returned region has a counter clockwise outer
/// boundary and clockwise holes; regions touching at a single vertex are returned separately. The
/// result order only depends on the inputs.
///
/// # Examples
///
/// ```
/// # use polyclip::polygon;
/// # use polyclip::polygon::*;
/// # use polyclip::boolean::*;
/// let a = Region::from_polygon(polygon![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
/// let b = Region::from_polygon(polygon![(1.0, 0.0), (3.0, 0.0), (3.0, 2.0), (1.0, 2.0)]);
/// let result = boolean(&[a], &[b], BooleanOp::Or, &BooleanOptions::new());
/// assert_eq!(result.len(), 1);
/// assert_eq!(result[0].area(), 6.0);
/// ```
pub fn boolean<T>(
    a: &[Region<T>],
    b: &[Region<T>],
    op: BooleanOp,
    options: &BooleanOptions<T>,
) -> Vec<Region<T>>
where
    T: Real,
{
    let mut loops = collect_loops(a, Operand::A);
    loops.extend(collect_loops(b, Operand::B));

    let eps = working_epsilon(&loops, options.pos_equal_eps);
    if eps != options.pos_equal_eps {
        log::debug!(
            "working tolerance {:?} instead of {:?} for the feature sizes of the operands",
            eps,
            options.pos_equal_eps
        );
    }

    let graph = OverlayGraph::build(&loops, eps);
    let classes = classify_edges(&graph, &loops);
    let selected = select_edges(&graph, &classes, op);

    let boundaries: Vec<SimplePolygon<T>> = trace_loops(&graph.vertexes, &selected)
        .into_iter()
        .filter_map(|ids| clean_loop(ids.iter().map(|&i| graph.vertexes[i]).collect(), eps))
        .collect();

    let regions = assemble_regions(boundaries, eps);
    log::debug!(
        "{:?}: {} + {} regions, {} overlay edges, {} selected, {} result regions",
        op,
        a.len(),
        b.len(),
        graph.edges.len(),
        selected.len(),
        regions.len()
    );

    regions
}

/// Intersection of two polygons using default options, see [intersect_opt].
#[inline]
pub fn intersect<T>(a: &SimplePolygon<T>, b: &SimplePolygon<T>) -> Vec<Region<T>>
where
    T: Real,
{
    intersect_opt(a, b, &Default::default())
}

/// Intersection of two polygons: the maximal connected regions common to both.
///
/// Disjoint polygons, or polygons only touching along an edge or at a vertex, give no regions.
///
/// Result boundaries carry no collinear vertexes (nor vertexes closer than the tolerance to the
/// line through their neighbours). `intersect(a, a)` therefore covers exactly the area of `a`, but
/// its boundary lacks any collinear vertexes `a` has.
pub fn intersect_opt<T>(
    a: &SimplePolygon<T>,
    b: &SimplePolygon<T>,
    options: &BooleanOptions<T>,
) -> Vec<Region<T>>
where
    T: Real,
{
    boolean(
        &[Region::from_polygon(a.clone())],
        &[Region::from_polygon(b.clone())],
        BooleanOp::And,
        options,
    )
}

/// Difference `a - b` of two polygons using default options, see [subtract_opt].
#[inline]
pub fn subtract<T>(a: &SimplePolygon<T>, b: &SimplePolygon<T>) -> Vec<Region<T>>
where
    T: Real,
{
    subtract_opt(a, b, &Default::default())
}

/// Difference `a - b` of two polygons: the regions of `a` not covered by `b`.
///
/// `b` covering `a` gives no regions, `b` disjoint from `a` gives `a` unchanged and `b` strictly
/// inside `a` gives `a` with `b` as its hole.
pub fn subtract_opt<T>(
    a: &SimplePolygon<T>,
    b: &SimplePolygon<T>,
    options: &BooleanOptions<T>,
) -> Vec<Region<T>>
where
    T: Real,
{
    boolean(
        &[Region::from_polygon(a.clone())],
        &[Region::from_polygon(b.clone())],
        BooleanOp::Not,
        options,
    )
}

/// Union of two regions using default options, see [join_opt].
#[inline]
pub fn join<T>(r1: &Region<T>, r2: &Region<T>) -> Vec<Region<T>>
where
    T: Real,
{
    join_opt(r1, r2, &Default::default())
}

/// Union of two regions (holes allowed), one region per connected component of the union.
/// Components touching at a single vertex stay separate regions.
pub fn join_opt<T>(r1: &Region<T>, r2: &Region<T>, options: &BooleanOptions<T>) -> Vec<Region<T>>
where
    T: Real,
{
    boolean(
        std::slice::from_ref(r1),
        std::slice::from_ref(r2),
        BooleanOp::Or,
        options,
    )
}
