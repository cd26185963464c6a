//! Polygon and region types with the checks run on input polygons.
mod region;
mod simple_polygon;
mod validate;

pub use region::*;
pub use simple_polygon::{Point, SelfIntersect, SelfIntersectVisitor, SimplePolygon};
pub use validate::*;

pub(crate) use simple_polygon::unwrap_spatial_index;
