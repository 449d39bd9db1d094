#![allow(non_snake_case)]

mod cholesky;
mod core;
pub(crate) use self::cholesky::*;
pub use self::core::*;
