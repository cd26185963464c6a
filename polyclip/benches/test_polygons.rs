use polyclip::{core::math::Vector2, core::traits::Real, polygon::SimplePolygon};

/// Star shaped polygon with `vertex_count` vertexes alternating between two radii.
pub fn star<T>(vertex_count: usize, center: Vector2<T>) -> SimplePolygon<T>
where
    T: Real,
{
    let outer_radius = T::from(40.0).unwrap();
    let inner_radius = T::from(25.0).unwrap();
    let tau = T::from(std::f64::consts::TAU).unwrap();

    (0..vertex_count)
        .map(|i| {
            let angle = T::from(i).unwrap() * tau / T::from(vertex_count).unwrap();
            let radius = if i % 2 == 0 { outer_radius } else { inner_radius };
            Vector2::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}

/// `count` axis aligned squares along a diagonal, each overlapping the next.
pub fn square_chain<T>(count: usize) -> Vec<SimplePolygon<T>>
where
    T: Real,
{
    let size = T::from(10.0).unwrap();
    let step = T::from(7.0).unwrap();
    (0..count)
        .map(|i| {
            let min = T::from(i).unwrap() * step;
            let max = min + size;
            SimplePolygon::new(vec![
                Vector2::new(min, min),
                Vector2::new(max, min),
                Vector2::new(max, max),
                Vector2::new(min, max),
            ])
        })
        .collect()
}
