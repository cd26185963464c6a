//! Scalar and control flow traits shared by the whole crate.
mod control_flow;
mod fuzzy;
mod real;

pub use control_flow::ControlFlow;
pub use fuzzy::FuzzyEq;
pub use real::Real;
