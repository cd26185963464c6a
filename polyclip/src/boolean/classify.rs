//! Classification of overlay edges against the other operand and selection of the edges bounding
//! the result.
use super::{
    graph::{BoundaryLoop, GraphEdge, Operand, OverlayGraph},
    BooleanOp,
};
use crate::core::{math::Vector2, traits::Real};
use std::collections::HashMap;

/// Position of an overlay edge relative to the region set of the other operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EdgeClass {
    /// Interior of the edge lies inside the other operand.
    Inside,
    /// Interior of the edge lies outside the other operand.
    Outside,
    /// The other operand has the same edge with the same direction (both interiors on one side).
    SharedSame,
    /// The other operand has the same edge in the opposite direction (interiors on either side).
    SharedOpposite,
}

/// Classifies every edge of `graph`, `loops` are the oriented boundaries the graph was built from.
pub(crate) fn classify_edges<T>(
    graph: &OverlayGraph<T>,
    loops: &[BoundaryLoop<T>],
) -> Vec<EdgeClass>
where
    T: Real,
{
    let mut by_key: HashMap<(usize, usize), Vec<usize>> = HashMap::with_capacity(graph.edges.len());
    for (i, e) in graph.edges.iter().enumerate() {
        by_key.entry(undirected_key(e)).or_default().push(i);
    }

    graph
        .edges
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let other = e.operand.other();
            let shared = by_key[&undirected_key(e)]
                .iter()
                .map(|&j| graph.edges[j])
                .find(|f| f.operand == other);

            match shared {
                Some(f) if f.from == e.from => EdgeClass::SharedSame,
                Some(_) => EdgeClass::SharedOpposite,
                None => {
                    if winding_number(loops, other, graph.edge_midpoint(i)) != 0 {
                        EdgeClass::Inside
                    } else {
                        EdgeClass::Outside
                    }
                }
            }
        })
        .collect()
}

/// Selects the directed edges bounding the result of `op`.
///
/// | op           | from A                  | from B                   |
/// |--------------|-------------------------|--------------------------|
/// | Or           | outside, shared same    | outside                  |
/// | And          | inside, shared same     | inside                   |
/// | Not          | outside, shared opposite| inside (reversed)        |
///
/// Shared edges are taken from A only so each appears once.
pub(crate) fn select_edges<T>(
    graph: &OverlayGraph<T>,
    classes: &[EdgeClass],
    op: BooleanOp,
) -> Vec<(usize, usize)>
where
    T: Real,
{
    use EdgeClass::*;

    graph
        .edges
        .iter()
        .zip(classes.iter())
        .filter_map(|(e, &class)| {
            let keep = match (op, e.operand) {
                (BooleanOp::Or, Operand::A) => matches!(class, Outside | SharedSame),
                (BooleanOp::Or, Operand::B) => class == Outside,
                (BooleanOp::And, Operand::A) => matches!(class, Inside | SharedSame),
                (BooleanOp::And, Operand::B) => class == Inside,
                (BooleanOp::Not, Operand::A) => matches!(class, Outside | SharedOpposite),
                (BooleanOp::Not, Operand::B) => class == Inside,
            };

            if !keep {
                return None;
            }

            if op == BooleanOp::Not && e.operand == Operand::B {
                Some((e.to, e.from))
            } else {
                Some((e.from, e.to))
            }
        })
        .collect()
}

#[inline]
fn undirected_key(e: &GraphEdge) -> (usize, usize) {
    if e.from < e.to {
        (e.from, e.to)
    } else {
        (e.to, e.from)
    }
}

/// Summed winding number of the boundaries of `operand` around `point`.
fn winding_number<T>(loops: &[BoundaryLoop<T>], operand: Operand, point: Vector2<T>) -> i32
where
    T: Real,
{
    loops
        .iter()
        .filter(|lp| {
            lp.operand == operand
                && point.x >= lp.extents.min_x
                && point.x <= lp.extents.max_x
                && point.y >= lp.extents.min_y
                && point.y <= lp.extents.max_y
        })
        .map(|lp| lp.polygon.winding_number(point))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boolean::graph::collect_loops;
    use crate::polygon::Region;

    fn square(x: f64, y: f64, size: f64) -> Region {
        Region::from_polygon(polygon![
            (x, y),
            (x + size, y),
            (x + size, y + size),
            (x, y + size)
        ])
    }

    fn classified(a: Region, b: Region) -> (OverlayGraph<f64>, Vec<EdgeClass>) {
        let mut loops = collect_loops(&[a], Operand::A);
        loops.extend(collect_loops(&[b], Operand::B));
        let graph = OverlayGraph::build(&loops, 1e-5);
        let classes = classify_edges(&graph, &loops);
        (graph, classes)
    }

    fn count(classes: &[EdgeClass], class: EdgeClass) -> usize {
        classes.iter().filter(|&&c| c == class).count()
    }

    #[test]
    fn side_by_side_squares_share_opposite_edge() {
        let (graph, classes) = classified(square(0.0, 0.0, 1.0), square(1.0, 0.0, 1.0));
        assert_eq!(graph.edges.len(), 8);
        assert_eq!(count(&classes, EdgeClass::SharedOpposite), 2);
        assert_eq!(count(&classes, EdgeClass::Outside), 6);
    }

    #[test]
    fn nested_square_shares_same_direction_edges() {
        let (_, classes) = classified(square(0.0, 0.0, 2.0), square(0.0, 0.0, 1.0));
        // bottom and left edges of the small square lie on the big one
        assert_eq!(count(&classes, EdgeClass::SharedSame), 4);
        // right and top of the small square
        assert_eq!(count(&classes, EdgeClass::Inside), 2);
    }

    #[test]
    fn difference_reverses_edges_of_b() {
        let (graph, classes) = classified(square(0.0, 0.0, 4.0), square(1.0, 1.0, 1.0));
        let selected = select_edges(&graph, &classes, BooleanOp::Not);
        assert_eq!(selected.len(), 8);
        let b_edges: Vec<_> = graph
            .edges
            .iter()
            .filter(|e| e.operand == Operand::B)
            .map(|e| (e.to, e.from))
            .collect();
        assert!(b_edges.iter().all(|e| selected.contains(e)));
    }
}
