#![allow(dead_code)]

use polyclip::{
    core::{math::Orientation, traits::FuzzyEq},
    polygon::{Region, SimplePolygon},
    AABB,
};

/// Summary of a region used to compare results without depending on vertex order or start
/// position.
#[derive(Debug, Copy, Clone)]
pub struct RegionProperties {
    pub hole_count: usize,
    pub vertex_count: usize,
    pub area: f64,
    pub perimeter: f64,
    pub extents: AABB,
}

impl RegionProperties {
    pub const PROP_CMP_EPS: f64 = 1e-5;

    pub fn new(
        hole_count: usize,
        vertex_count: usize,
        area: f64,
        perimeter: f64,
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    ) -> Self {
        Self {
            hole_count,
            vertex_count,
            area,
            perimeter,
            extents: AABB::new(min_x, min_y, max_x, max_y),
        }
    }

    pub fn from_region(region: &Region) -> Self {
        let extents = region
            .outer()
            .extents()
            .expect("region outer boundary is not empty");
        Self {
            hole_count: region.holes().len(),
            vertex_count: region.boundaries().map(|b| b.vertex_count()).sum(),
            area: region.area(),
            perimeter: region.perimeter(),
            extents,
        }
    }

    pub fn fuzzy_eq_eps(&self, other: &Self, eps: f64) -> bool {
        self.hole_count == other.hole_count
            && self.vertex_count == other.vertex_count
            && self.area.fuzzy_eq_eps(other.area, eps)
            && self.perimeter.fuzzy_eq_eps(other.perimeter, eps)
            && aabb_fuzzy_eq_eps(&self.extents, &other.extents, eps)
    }
}

fn aabb_fuzzy_eq_eps(a: &AABB, b: &AABB, eps: f64) -> bool {
    a.min_x.fuzzy_eq_eps(b.min_x, eps)
        && a.min_y.fuzzy_eq_eps(b.min_y, eps)
        && a.max_x.fuzzy_eq_eps(b.max_x, eps)
        && a.max_y.fuzzy_eq_eps(b.max_y, eps)
}

pub fn create_property_set<'a, I>(regions: I) -> Vec<RegionProperties>
where
    I: IntoIterator<Item = &'a Region>,
{
    regions.into_iter().map(RegionProperties::from_region).collect()
}

pub fn property_sets_match(
    result_set: &[RegionProperties],
    expected_set: &[RegionProperties],
) -> bool {
    let mut sets_match = true;
    if result_set.len() != expected_set.len() {
        sets_match = false;
    } else {
        // N^2 comparison, result sets are small
        for properties_expected in expected_set {
            let match_count = result_set
                .iter()
                .filter(|properties_result| {
                    properties_expected
                        .fuzzy_eq_eps(properties_result, RegionProperties::PROP_CMP_EPS)
                })
                .count();

            if match_count != 1 {
                sets_match = false;
                break;
            }
        }
    }

    if !sets_match {
        eprintln!("result:\n{:?}", result_set);
        eprintln!("expected:\n{:?}", expected_set);
    }

    sets_match
}

/// Checks the structural guarantees every produced region carries: counter clockwise outer
/// boundary, clockwise holes, at least 3 vertexes per boundary and finite coordinates.
pub fn assert_well_formed(regions: &[Region]) {
    for (i, region) in regions.iter().enumerate() {
        assert!(!region.is_empty(), "region {} is empty", i);
        assert_eq!(
            region.outer().orientation(),
            Orientation::CounterClockwise,
            "region {} outer boundary",
            i
        );
        for hole in region.holes() {
            assert_eq!(hole.orientation(), Orientation::Clockwise, "region {} hole", i);
        }
        for boundary in region.boundaries() {
            assert!(boundary.vertex_count() >= 3, "region {} boundary", i);
            assert!(
                boundary
                    .vertexes()
                    .iter()
                    .all(|v| v.x.is_finite() && v.y.is_finite()),
                "region {} has non finite coordinates",
                i
            );
        }
    }
}

pub fn total_area(regions: &[Region]) -> f64 {
    regions.iter().map(|r| r.area()).sum()
}

/// Axis aligned rectangle in counter clockwise order.
pub fn rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> SimplePolygon {
    polyclip::polygon![(min_x, min_y), (max_x, min_y), (max_x, max_y), (min_x, max_y)]
}
