//! Tracing selected overlay edges into closed boundaries and grouping them into regions.
use crate::{
    core::{
        math::{
            angle, clockwise_sweep, dist_squared, line_seg_closest_point, midpoint, orient2d,
            Orientation, Vector2,
        },
        traits::Real,
    },
    polygon::{Region, SimplePolygon},
};
use std::collections::HashMap;

/// Walks the directed `edges` (pairs of indexes into `vertexes`) into closed vertex loops.
///
/// At every vertex the walk continues with the unused outgoing edge reached first when turning
/// clockwise from the reversed incoming edge, so regions touching at a vertex are traced as
/// separate loops. Walks that visit a vertex more than once are split into simple loops. Chains
/// that cannot be closed are discarded.
pub(crate) fn trace_loops<T>(vertexes: &[Vector2<T>], edges: &[(usize, usize)]) -> Vec<Vec<usize>>
where
    T: Real,
{
    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); vertexes.len()];
    for (i, &(from, _)) in edges.iter().enumerate() {
        outgoing[from].push(i);
    }

    let mut used = vec![false; edges.len()];
    let mut result = Vec::new();
    for start in 0..edges.len() {
        if used[start] {
            continue;
        }

        used[start] = true;
        let start_vertex = edges[start].0;
        let mut path = vec![start_vertex];
        let mut current = start;
        let closed = loop {
            let (from, at) = edges[current];
            let back_angle = angle(vertexes[at], vertexes[from]);

            let mut best: Option<(usize, T)> = None;
            for &e in &outgoing[at] {
                let available = !used[e] || (e == start && at == start_vertex);
                if !available {
                    continue;
                }
                let sweep = clockwise_sweep(back_angle, angle(vertexes[at], vertexes[edges[e].1]));
                if best.map_or(true, |(_, s)| sweep < s) {
                    best = Some((e, sweep));
                }
            }

            match best {
                None => break false,
                Some((e, _)) if e == start => break true,
                Some((e, _)) => {
                    used[e] = true;
                    path.push(at);
                    current = e;
                }
            }
        };

        if closed {
            result.extend(split_at_repeated_vertexes(path));
        } else {
            log::warn!(
                "discarding open chain of {} edges starting at {:?}",
                path.len(),
                vertexes[start_vertex]
            );
        }
    }

    result
}

/// Splits a closed walk into loops that visit each vertex once.
fn split_at_repeated_vertexes(path: Vec<usize>) -> Vec<Vec<usize>> {
    let mut result = Vec::new();
    let mut stack: Vec<usize> = Vec::with_capacity(path.len());
    let mut positions: HashMap<usize, usize> = HashMap::with_capacity(path.len());
    for v in path {
        if let Some(&pos) = positions.get(&v) {
            // loop from the earlier visit of v back to v
            let sub_loop = stack.split_off(pos + 1);
            for w in &sub_loop {
                positions.remove(w);
            }
            let mut sub_loop = sub_loop;
            sub_loop.insert(0, v);
            result.push(sub_loop);
        } else {
            positions.insert(v, stack.len());
            stack.push(v);
        }
    }

    result.push(stack);
    result
}

/// Removes repeated and collinear vertexes (exactly collinear or within `pos_equal_eps` of the
/// line through the neighbours) until none remain. Returns `None` when fewer than 3 vertexes are
/// left or the loop is thinner than `pos_equal_eps` on average.
pub(crate) fn clean_loop<T>(points: Vec<Vector2<T>>, pos_equal_eps: T) -> Option<SimplePolygon<T>>
where
    T: Real,
{
    let mut points = points;
    loop {
        let mut removed = false;
        let mut i = 0;
        while i < points.len() && points.len() >= 3 {
            let n = points.len();
            let prev = points[(i + n - 1) % n];
            let curr = points[i];
            let next = points[(i + 1) % n];
            if is_redundant(prev, curr, next, pos_equal_eps) {
                points.remove(i);
                removed = true;
            } else {
                i += 1;
            }
        }

        if points.len() < 3 {
            return None;
        }

        if !removed {
            break;
        }
    }

    let polygon = SimplePolygon::new(points);
    if polygon.area().abs() <= pos_equal_eps * polygon.perimeter() {
        return None;
    }

    Some(polygon)
}

fn is_redundant<T>(prev: Vector2<T>, curr: Vector2<T>, next: Vector2<T>, eps: T) -> bool
where
    T: Real,
{
    if curr.fuzzy_eq_eps(prev, eps) || curr.fuzzy_eq_eps(next, eps) {
        return true;
    }

    if orient2d(prev, curr, next) == Orientation::Collinear {
        return true;
    }

    let base = next - prev;
    let base_len = base.length();
    if base_len < eps {
        // spike going out and straight back
        return true;
    }

    (base.perp_dot(curr - prev) / base_len).abs() < eps
}

/// Groups traced boundaries into regions: counter clockwise loops become outer boundaries,
/// clockwise loops become holes of the smallest outer boundary enclosing them. Holes without an
/// enclosing boundary are dropped.
pub(crate) fn assemble_regions<T>(loops: Vec<SimplePolygon<T>>, pos_equal_eps: T) -> Vec<Region<T>>
where
    T: Real,
{
    let (outers, holes): (Vec<_>, Vec<_>) = loops.into_iter().partition(|l| l.area() > T::zero());
    let outer_areas: Vec<T> = outers.iter().map(|o| o.area()).collect();

    let mut hole_lists: Vec<Vec<SimplePolygon<T>>> = vec![Vec::new(); outers.len()];
    for hole in holes {
        let mut best: Option<(usize, T)> = None;
        for (i, outer) in outers.iter().enumerate() {
            if best.map_or(false, |(_, a)| outer_areas[i] >= a) {
                continue;
            }
            if hole_inside_outer(&hole, outer, pos_equal_eps) {
                best = Some((i, outer_areas[i]));
            }
        }

        match best {
            Some((i, _)) => hole_lists[i].push(hole),
            None => log::warn!(
                "dropping hole with {} vertexes and no enclosing boundary",
                hole.vertex_count()
            ),
        }
    }

    outers
        .into_iter()
        .zip(hole_lists)
        .map(|(outer, holes)| Region::new(outer, holes))
        .collect()
}

/// `true` if `hole` lies inside `outer`. Decided by the first hole vertex or edge midpoint further
/// than `pos_equal_eps` from the outer boundary; a hole lying entirely on the boundary counts as
/// inside when its extents are.
fn hole_inside_outer<T>(hole: &SimplePolygon<T>, outer: &SimplePolygon<T>, pos_equal_eps: T) -> bool
where
    T: Real,
{
    let (Some(h), Some(o)) = (hole.extents(), outer.extents()) else {
        return false;
    };
    if h.min_x < o.min_x - pos_equal_eps
        || h.min_y < o.min_y - pos_equal_eps
        || h.max_x > o.max_x + pos_equal_eps
        || h.max_y > o.max_y + pos_equal_eps
    {
        return false;
    }

    let eps2 = pos_equal_eps * pos_equal_eps;
    let off_boundary = |p: Vector2<T>| {
        outer
            .iter_segments()
            .all(|(v1, v2)| dist_squared(line_seg_closest_point(v1, v2, p), p) > eps2)
    };

    let candidates = hole
        .iter_segments()
        .flat_map(|(v1, v2)| [v1, midpoint(v1, v2)]);
    for p in candidates {
        if off_boundary(p) {
            return outer.winding_number(p) != 0;
        }
    }

    true
}
