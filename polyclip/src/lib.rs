//! Boolean operations (union, intersection, difference) over simple 2D polygons.
//!
//! Input polygons are checked with [polygon::validate], combined with the functions of
//! [boolean] and run over whole batches with [ops]. Results are [polygon::Region]s: an outer
//! boundary with zero or more holes.
//!
//! # Examples
//!
//! ```
//! use polyclip::polygon;
//! use polyclip::polygon::*;
//! use polyclip::ops::*;
//!
//! let polygons: Vec<SimplePolygon> = vec![
//!     polygon![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
//!     polygon![(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 15.0)],
//! ];
//! validate_batch(&polygons).unwrap();
//!
//! let union = compute_union(&polygons);
//! assert_eq!(union.len(), 1);
//! assert_eq!(union[0].area(), 175.0);
//!
//! let difference = compute_difference(&polygons);
//! assert_eq!(difference[0].area(), 75.0);
//! ```
extern crate static_aabb2d_index;

#[macro_use]
mod macros;
pub mod boolean;
pub mod core;
pub mod error;
pub mod ops;
pub mod polygon;

pub use static_aabb2d_index::AABB;
