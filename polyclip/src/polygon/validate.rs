//! Structural checks run on input polygons before any boolean operation.
use super::{Point, SimplePolygon};
use crate::{core::math::are_collinear, core::traits::Real, error::ValidationError};

/// `false` if either coordinate of `point` is infinite or NaN.
#[inline]
pub fn is_valid_point<T>(point: Point<T>) -> bool
where
    T: Real,
{
    point.is_valid()
}

/// `true` if no two non adjacent edges touch or cross, adjacent edges meet only at their shared
/// vertex and no edge has zero length. Polygons with fewer than 3 vertexes are never simple.
///
/// All tests are exact.
///
/// # Examples
///
/// ```
/// # use polyclip::polygon;
/// # use polyclip::polygon::*;
/// let square: SimplePolygon = polygon![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
/// assert!(is_simple(&square));
/// let bowtie: SimplePolygon = polygon![(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)];
/// assert!(!is_simple(&bowtie));
/// ```
pub fn is_simple<T>(polygon: &SimplePolygon<T>) -> bool
where
    T: Real,
{
    polygon.vertex_count() >= 3 && !polygon.scan_for_self_intersect()
}

/// Checks the structural requirements of `polygon`, in order:
///
/// 1. at least 3 vertexes,
/// 2. every vertex has finite coordinates (the first offending vertex is reported),
/// 3. the first three vertexes, when distinct, are not collinear,
/// 4. the polygon is simple ([is_simple]).
///
/// The first failing check is returned. The leading triplet check is a conservative heuristic, a
/// valid simple polygon starting on a straight run is rejected. A repeated vertex among the first
/// three is left to the simplicity check and reports `NotSimple`.
///
/// # Examples
///
/// ```
/// # use polyclip::polygon;
/// # use polyclip::polygon::*;
/// # use polyclip::error::ValidationError;
/// let square: SimplePolygon = polygon![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
/// assert_eq!(validate(&square), Ok(()));
/// let line: SimplePolygon = polygon![(0.0, 0.0), (1.0, 0.0)];
/// assert_eq!(validate(&line), Err(ValidationError::TooFewVertices { count: 2 }));
/// ```
pub fn validate<T>(polygon: &SimplePolygon<T>) -> Result<(), ValidationError>
where
    T: Real,
{
    let count = polygon.vertex_count();
    if count < 3 {
        return Err(ValidationError::TooFewVertices { count });
    }

    if let Some(vertex_index) = polygon.vertexes().iter().position(|&v| !is_valid_point(v)) {
        return Err(ValidationError::InvalidCoordinate { vertex_index });
    }

    let (v0, v1, v2) = (polygon[0], polygon[1], polygon[2]);
    if v0 != v1 && v1 != v2 && v0 != v2 && are_collinear(v0, v1, v2) {
        return Err(ValidationError::DegenerateLeadingTriplet);
    }

    if !is_simple(polygon) {
        return Err(ValidationError::NotSimple);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checks_run_in_order() {
        // too few vertexes wins over the invalid coordinate
        let p: SimplePolygon = polygon![(f64::NAN, 0.0), (1.0, 0.0)];
        assert_eq!(validate(&p), Err(ValidationError::TooFewVertices { count: 2 }));

        // invalid coordinate wins over the collinear leading triplet
        let p: SimplePolygon = polygon![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (5.0, f64::INFINITY)];
        assert_eq!(
            validate(&p),
            Err(ValidationError::InvalidCoordinate { vertex_index: 3 })
        );

        let p: SimplePolygon = polygon![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (1.0, 1.0)];
        assert_eq!(validate(&p), Err(ValidationError::DegenerateLeadingTriplet));
    }

    #[test]
    fn repeated_vertex_in_triangle() {
        let p: SimplePolygon = polygon![(0.0, 0.0), (1.0, 1.0), (1.0, 1.0)];
        assert!(!is_simple(&p));
        assert_eq!(validate(&p), Err(ValidationError::NotSimple));

        let p: SimplePolygon = polygon![(0.0, 0.0), (0.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        assert_eq!(validate(&p), Err(ValidationError::NotSimple));
    }

    #[test]
    fn repeated_vertex_later_is_not_simple() {
        let p: SimplePolygon = polygon![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (2.0, 2.0), (0.0, 2.0)];
        assert_eq!(validate(&p), Err(ValidationError::NotSimple));
    }

    #[test]
    fn few_vertexes_are_not_simple() {
        let p: SimplePolygon = polygon![(0.0, 0.0), (1.0, 0.0)];
        assert!(!is_simple(&p));
        assert!(!is_simple(&SimplePolygon::<f64>::empty()));
    }
}
