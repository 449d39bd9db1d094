use thiserror::Error;

/// Error type returned by dense factorization routines.  Cholesky
/// errors carry the (1-based) index of the first non-positive pivot.
#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum DenseFactorizationError {
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    #[error("Cholesky error: non-positive pivot at leading minor {0}")]
    Cholesky(i32),
}
