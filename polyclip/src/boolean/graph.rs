//! Planar overlay of the boundaries of two region sets: every boundary edge is split at all
//! contacts with other edges and near coincident positions are welded into shared vertexes.
use crate::{
    core::{
        math::{
            dist_squared, line_seg_closest_point, min_max, parametric_from_point, seg_seg_intr,
            SegIntr, Vector2,
        },
        traits::Real,
    },
    polygon::{unwrap_spatial_index, Region, SimplePolygon},
};
use static_aabb2d_index as aabb_index;
use static_aabb2d_index::{StaticAABB2DIndexBuilder, AABB};

/// Which boolean operand a boundary (or edge) came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Operand {
    A,
    B,
}

impl Operand {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Operand::A => Operand::B,
            Operand::B => Operand::A,
        }
    }
}

/// One closed boundary of an operand, oriented so the interior of its region is on the left
/// (outer boundaries counter clockwise, holes clockwise).
#[derive(Debug, Clone)]
pub(crate) struct BoundaryLoop<T> {
    pub polygon: SimplePolygon<T>,
    pub extents: AABB<T>,
    pub operand: Operand,
}

/// Collects the boundaries of `regions` with normalized orientation. Empty regions and boundaries
/// with fewer than 3 vertexes or zero area are skipped.
pub(crate) fn collect_loops<T>(regions: &[Region<T>], operand: Operand) -> Vec<BoundaryLoop<T>>
where
    T: Real,
{
    let mut result = Vec::new();
    for region in regions.iter().filter(|r| !r.is_empty()) {
        let mut add = |polygon: &SimplePolygon<T>, want_ccw: bool| {
            if polygon.vertex_count() < 3 {
                return;
            }
            let area = polygon.area();
            if area == T::zero() {
                return;
            }
            let polygon = if (area > T::zero()) == want_ccw {
                polygon.clone()
            } else {
                polygon.reversed()
            };
            if let Some(extents) = polygon.extents() {
                result.push(BoundaryLoop {
                    polygon,
                    extents,
                    operand,
                });
            }
        };

        add(region.outer(), true);
        for hole in region.holes() {
            add(hole, false);
        }
    }

    result
}

/// Fraction of the smallest boundary feature the working tolerance is limited to.
const FEATURE_DIVISOR: f64 = 16.0;

/// Rounding error multiple of the largest coordinate the working tolerance never goes below.
const ROUNDOFF_MULTIPLE: f64 = 64.0;

/// Tolerance used for the overlay of `loops`.
///
/// This is `pos_equal_eps` unless some loop has a feature (an edge, or the gap between a vertex
/// and a non incident edge of the same loop) shorter than `16 * pos_equal_eps`. The tolerance is
/// then cut to a sixteenth of that feature, so welding and loop cleaning cannot erase a boundary
/// that passed validation. It never drops below a small multiple of the rounding error of the
/// largest coordinate.
pub(crate) fn working_epsilon<T>(loops: &[BoundaryLoop<T>], pos_equal_eps: T) -> T
where
    T: Real,
{
    let divisor = T::from(FEATURE_DIVISOR).unwrap();
    let mut feature = pos_equal_eps * divisor;
    let mut magnitude = T::zero();
    for lp in loops {
        let e = &lp.extents;
        magnitude = num_traits::real::Real::max(magnitude, e.min_x.abs());
        magnitude = num_traits::real::Real::max(magnitude, e.min_y.abs());
        magnitude = num_traits::real::Real::max(magnitude, e.max_x.abs());
        magnitude = num_traits::real::Real::max(magnitude, e.max_y.abs());
        feature = smallest_feature(&lp.polygon, feature);
    }

    let floor = magnitude * T::from(ROUNDOFF_MULTIPLE).unwrap() * T::unit_roundoff();
    num_traits::real::Real::max(num_traits::real::Real::min(feature / divisor, pos_equal_eps), floor)
}

/// Smallest edge length or vertex to non incident edge distance of `polygon`, capped at `limit`.
fn smallest_feature<T>(polygon: &SimplePolygon<T>, limit: T) -> T
where
    T: Real,
{
    let mut result = limit;
    for (v1, v2) in polygon.iter_segments() {
        result = num_traits::real::Real::min(result, (v2 - v1).length());
    }

    let vertexes = polygon.vertexes();
    let index = polygon.create_aabb_index();
    let mut query_stack = Vec::with_capacity(8);
    let mut hits = Vec::new();
    for (i, &p) in vertexes.iter().enumerate() {
        hits.clear();
        let mut query_visitor = |hit: usize| {
            hits.push(hit);
            aabb_index::Control::<()>::Continue
        };
        index.visit_query_with_stack(
            p.x - result,
            p.y - result,
            p.x + result,
            p.y + result,
            &mut query_visitor,
            &mut query_stack,
        );

        for &j in &hits {
            // segment j runs from vertex j to the next vertex
            let next = polygon.next_wrapping_index(j);
            if j == i || next == i {
                continue;
            }
            let closest = line_seg_closest_point(vertexes[j], vertexes[next], p);
            result = num_traits::real::Real::min(result, dist_squared(closest, p).sqrt());
        }
    }

    result
}

/// Directed edge between two welded vertexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GraphEdge {
    pub from: usize,
    pub to: usize,
    pub operand: Operand,
}

/// Boundary edges of both operands after splitting and welding.
#[derive(Debug, Clone)]
pub(crate) struct OverlayGraph<T> {
    pub vertexes: Vec<Vector2<T>>,
    pub edges: Vec<GraphEdge>,
}

#[derive(Debug, Clone, Copy)]
struct Segment<T> {
    p0: Vector2<T>,
    p1: Vector2<T>,
    loop_index: usize,
    seg_index: usize,
    loop_len: usize,
    /// Position index of the end vertex (start vertex position index is the segment index).
    end_position: usize,
    operand: Operand,
}

impl<T> Segment<T>
where
    T: Real,
{
    fn is_adjacent(&self, other: &Self) -> bool {
        self.loop_index == other.loop_index
            && (other.seg_index == (self.seg_index + 1) % self.loop_len
                || self.seg_index == (other.seg_index + 1) % self.loop_len)
    }
}

/// Disjoint set over position indexes, the representative of a set is its lowest index.
struct WeldSet {
    parents: Vec<usize>,
}

impl WeldSet {
    fn new(count: usize) -> Self {
        Self {
            parents: (0..count).collect(),
        }
    }

    fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parents[root] != root {
            root = self.parents[root];
        }
        // path compression
        let mut curr = i;
        while self.parents[curr] != root {
            let next = self.parents[curr];
            self.parents[curr] = root;
            curr = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra < rb {
            self.parents[rb] = ra;
        } else if rb < ra {
            self.parents[ra] = rb;
        }
    }
}

impl<T> OverlayGraph<T>
where
    T: Real,
{
    /// Builds the overlay of `loops`.
    ///
    /// Edges are split at every contact found with [seg_seg_intr] using `pos_equal_eps`, then all
    /// vertexes and contact points closer than `pos_equal_eps` are welded. Boundary vertexes come
    /// first so a welded vertex keeps an input position when it has one. Edges collapsing to a
    /// single vertex are dropped.
    pub fn build(loops: &[BoundaryLoop<T>], pos_equal_eps: T) -> Self {
        let mut segments = Vec::new();
        let mut positions = Vec::new();
        for (loop_index, lp) in loops.iter().enumerate() {
            let offset = positions.len();
            let n = lp.polygon.vertex_count();
            for (seg_index, (p0, p1)) in lp.polygon.iter_segments().enumerate() {
                segments.push(Segment {
                    p0,
                    p1,
                    loop_index,
                    seg_index,
                    loop_len: n,
                    end_position: offset + (seg_index + 1) % n,
                    operand: lp.operand,
                });
                positions.push(p0);
            }
        }

        let split_points = find_split_points(&segments, pos_equal_eps);

        // split points get positions after all boundary vertexes
        let mut segment_splits: Vec<Vec<usize>> = vec![Vec::new(); segments.len()];
        for (seg, points) in split_points.into_iter().enumerate() {
            for p in points {
                segment_splits[seg].push(positions.len());
                positions.push(p);
            }
        }

        let welded = weld_positions(&positions, pos_equal_eps);

        // compact welded roots into vertex ids
        let mut vertex_ids = vec![usize::MAX; positions.len()];
        let mut vertexes = Vec::new();
        for (i, &root) in welded.iter().enumerate() {
            if vertex_ids[root] == usize::MAX {
                vertex_ids[root] = vertexes.len();
                vertexes.push(positions[root]);
            }
            vertex_ids[i] = vertex_ids[root];
        }

        let mut edges = Vec::with_capacity(segments.len());
        let mut chain = Vec::new();
        for (seg_index, seg) in segments.iter().enumerate() {
            let start_id = vertex_ids[seg_index];
            let end_id = vertex_ids[seg.end_position];

            let mut inner: Vec<(T, usize)> = segment_splits[seg_index]
                .iter()
                .map(|&pos| vertex_ids[pos])
                .filter(|&id| id != start_id && id != end_id)
                .map(|id| (parametric_from_point(seg.p0, seg.p1, vertexes[id]), id))
                .collect();
            inner.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

            chain.clear();
            chain.push(start_id);
            for (_, id) in inner {
                if chain.last() != Some(&id) {
                    chain.push(id);
                }
            }
            if chain.last() != Some(&end_id) {
                chain.push(end_id);
            }

            for w in chain.windows(2) {
                if w[0] != w[1] {
                    edges.push(GraphEdge {
                        from: w[0],
                        to: w[1],
                        operand: seg.operand,
                    });
                }
            }
        }

        log::trace!(
            "overlay graph: {} segments, {} positions, {} vertexes, {} edges",
            segments.len(),
            positions.len(),
            vertexes.len(),
            edges.len()
        );

        Self { vertexes, edges }
    }

    /// Position of the middle of edge `edge_index`.
    #[inline]
    pub fn edge_midpoint(&self, edge_index: usize) -> Vector2<T> {
        let e = self.edges[edge_index];
        crate::core::math::midpoint(self.vertexes[e.from], self.vertexes[e.to])
    }
}

/// Finds all contact points between segments (other than the shared vertex of adjacent segments in
/// the same loop), returned per segment.
fn find_split_points<T>(segments: &[Segment<T>], pos_equal_eps: T) -> Vec<Vec<Vector2<T>>>
where
    T: Real,
{
    let mut result = vec![Vec::new(); segments.len()];
    if segments.is_empty() {
        return result;
    }

    let mut builder = StaticAABB2DIndexBuilder::new(segments.len());
    for s in segments {
        let (min_x, max_x) = min_max(s.p0.x, s.p1.x);
        let (min_y, max_y) = min_max(s.p0.y, s.p1.y);
        builder.add(
            min_x - pos_equal_eps,
            min_y - pos_equal_eps,
            max_x + pos_equal_eps,
            max_y + pos_equal_eps,
        );
    }
    let index = unwrap_spatial_index(builder);

    let mut query_stack = Vec::with_capacity(8);
    let mut hits = Vec::new();
    for (i, s) in segments.iter().enumerate() {
        let (min_x, max_x) = min_max(s.p0.x, s.p1.x);
        let (min_y, max_y) = min_max(s.p0.y, s.p1.y);

        hits.clear();
        let mut query_visitor = |hit: usize| {
            // each pair once
            if hit > i {
                hits.push(hit);
            }
            aabb_index::Control::<()>::Continue
        };
        index.visit_query_with_stack(
            min_x - pos_equal_eps,
            min_y - pos_equal_eps,
            max_x + pos_equal_eps,
            max_y + pos_equal_eps,
            &mut query_visitor,
            &mut query_stack,
        );

        for &j in &hits {
            let u = &segments[j];
            if s.is_adjacent(u) {
                continue;
            }

            match seg_seg_intr(s.p0, s.p1, u.p0, u.p1, pos_equal_eps) {
                SegIntr::NoIntersect => {}
                SegIntr::OneIntersect { point } => {
                    result[i].push(point);
                    result[j].push(point);
                }
                SegIntr::Overlapping { point1, point2 } => {
                    result[i].push(point1);
                    result[i].push(point2);
                    result[j].push(point1);
                    result[j].push(point2);
                }
            }
        }
    }

    result
}

/// Welds positions closer than `pos_equal_eps` (per coordinate), returns the representative
/// (lowest) position index for every position.
fn weld_positions<T>(positions: &[Vector2<T>], pos_equal_eps: T) -> Vec<usize>
where
    T: Real,
{
    let mut set = WeldSet::new(positions.len());
    if positions.is_empty() {
        return Vec::new();
    }

    let mut builder = StaticAABB2DIndexBuilder::new(positions.len());
    for p in positions {
        builder.add(p.x, p.y, p.x, p.y);
    }
    let index = unwrap_spatial_index(builder);

    let mut query_stack = Vec::with_capacity(8);
    let mut hits = Vec::new();
    for (i, p) in positions.iter().enumerate() {
        hits.clear();
        let mut query_visitor = |hit: usize| {
            if hit > i {
                hits.push(hit);
            }
            aabb_index::Control::<()>::Continue
        };
        index.visit_query_with_stack(
            p.x - pos_equal_eps,
            p.y - pos_equal_eps,
            p.x + pos_equal_eps,
            p.y + pos_equal_eps,
            &mut query_visitor,
            &mut query_stack,
        );

        for &j in &hits {
            if p.fuzzy_eq_eps(positions[j], pos_equal_eps) {
                set.union(i, j);
            }
        }
    }

    (0..positions.len()).map(|i| set.find(i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::FuzzyEq;

    fn square(x: f64, y: f64, size: f64) -> Region {
        Region::from_polygon(polygon![
            (x, y),
            (x + size, y),
            (x + size, y + size),
            (x, y + size)
        ])
    }

    #[test]
    fn loops_are_normalized() {
        let outer = polygon![(0.0, 0.0), (0.0, 4.0), (4.0, 4.0), (4.0, 0.0)];
        let hole = polygon![(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)];
        let loops = collect_loops(&[Region::new(outer, vec![hole])], Operand::A);
        assert_eq!(loops.len(), 2);
        assert!(loops[0].polygon.area() > 0.0);
        assert!(loops[1].polygon.area() < 0.0);
        assert!(collect_loops::<f64>(&[Region::empty()], Operand::B).is_empty());
    }

    #[test]
    fn working_epsilon_follows_small_features() {
        let unit = collect_loops(&[square(0.0, 0.0, 1.0)], Operand::A);
        assert_eq!(working_epsilon(&unit, 1e-5), 1e-5);

        let tiny = collect_loops(&[square(0.0, 0.0, 4e-5)], Operand::B);
        assert_fuzzy_eq!(working_epsilon(&tiny, 1e-5), 4e-5 / 16.0);

        // a notch leaving a 1e-6 gap between a vertex and the opposite edge
        let notched = collect_loops(
            &[Region::from_polygon(polygon![
                (0.0, 0.0),
                (10.0, 0.0),
                (10.0, 10.0),
                (5.0, 1e-6),
                (0.0, 10.0)
            ])],
            Operand::A,
        );
        assert_fuzzy_eq!(working_epsilon(&notched, 1e-5), 1e-6 / 16.0);

        // never below the rounding error of large coordinates
        let far = collect_loops(&[square(1e12, 1e12, 1e-3)], Operand::A);
        assert!(working_epsilon(&far, 1e-5) >= 1e12 * 64.0 * f64::EPSILON * 0.5);
    }

    #[test]
    fn overlapping_squares_split_at_crossings() {
        let mut loops = collect_loops(&[square(0.0, 0.0, 10.0)], Operand::A);
        loops.extend(collect_loops(&[square(5.0, 5.0, 10.0)], Operand::B));
        let graph = OverlayGraph::build(&loops, 1e-5);
        // 8 corners plus the 2 crossings
        assert_eq!(graph.vertexes.len(), 10);
        // each square has 2 edges split in two
        assert_eq!(graph.edges.len(), 12);
    }

    #[test]
    fn near_positions_are_welded() {
        let mut loops = collect_loops(&[square(0.0, 0.0, 1.0)], Operand::A);
        loops.extend(collect_loops(&[square(1.0 + 1e-7, 0.0, 1.0)], Operand::B));
        let graph = OverlayGraph::build(&loops, 1e-5);
        assert_eq!(graph.vertexes.len(), 6);
        // shared edge appears once per operand, in opposite directions
        let a_edge = graph
            .edges
            .iter()
            .find(|e| {
                e.operand == Operand::A
                    && graph.vertexes[e.from].x == 1.0
                    && graph.vertexes[e.to].x == 1.0
            })
            .unwrap();
        assert!(graph
            .edges
            .iter()
            .any(|e| e.operand == Operand::B && e.from == a_edge.to && e.to == a_edge.from));
    }
}
