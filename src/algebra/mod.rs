//! Linear algebra used internally by the solver.
//!
//! Everything here operates on slices of [`FloatT`] and on the small
//! column-major [`Matrix`] type.  The problem dimensions are fixed and
//! small, so all storage is dense.

mod dense;
mod error_types;
mod floats;
mod math_traits;
mod vecmath;

pub use dense::*;
pub(crate) use error_types::*;
pub use floats::*;
pub use math_traits::*;

#[cfg(test)]
mod tests;
