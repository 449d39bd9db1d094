//! Timing utilities.
//!
//! [`Timers`] keeps a hierarchy of named timers used to break down the
//! time spent inside a solve.  [`Stopwatch`] is the plain wall-clock
//! `tic` / `toc` pair used by the timing harness.

#[allow(clippy::module_inception)]
mod timers;
mod stopwatch;

pub use stopwatch::*;
pub use timers::*;
