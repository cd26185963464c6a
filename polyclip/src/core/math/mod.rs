//! Core math for points, segments and the exact orientation predicate.
mod base_math;
mod predicates;
mod segment_intersect;
mod vector2;

pub use base_math::*;
pub use predicates::{are_collinear, orient2d, Orientation};
pub use segment_intersect::{seg_seg_intr, seg_seg_intr_exact, SegIntr};
pub use vector2::{vec2, Vector2};
