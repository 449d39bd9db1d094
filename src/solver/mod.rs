//! Solver main module.
//!
//! The problem has fixed dimensions.  [`Params`] holds the data,
//! [`Settings`] the algorithm controls, and [`Solver`] owns both
//! together with a workspace that is sized once and reused by every
//! call to [`Solver::solve`].
//!
//! Internally the problem is rewritten in the standard form
//!
//! $$
//! \begin{array}{rl}
//! \text{minimize} & \frac{1}{2}x^T P x + q^T x + r\\\\\[2ex\]
//!  \text{subject to} & Gx + s = h, \quad s \ge 0
//!  \end{array}
//! $$
//!
//! and solved by a Mehrotra predictor-corrector interior point method.

// internal module structure
mod info;
mod info_print;
mod kktsystem;
mod params;
mod problemdata;
mod settings;
#[allow(clippy::module_inception)]
mod solver;
mod variables;
mod workspace;

#[cfg(feature = "serde")]
mod json;

//Here we expose only part of the solver internals

pub use info::{SolveInfo, SolverStatus};
pub use params::*;
pub use settings::{Settings, SettingsBuilder, SettingsBuilderError, SettingsError};
pub use solver::Solver;
pub use variables::Vars;

#[cfg(feature = "serde")]
pub use json::JsonError;
