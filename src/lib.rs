//! __wrenchqp__ is a fixed size interior point solver for the contact
//! wrench distribution problem
//!
//! $$
//! \begin{array}{rl}
//! \text{minimize} & (A\rho - W)^T \mathrm{diag}(C) (A\rho - W) + \epsilon\, \rho^T\rho \\\\\[2ex\]
//!  \text{subject to} & \rho \ge 0, \quad B\rho \ge f_{min}
//!  \end{array}
//! $$
//!
//! with $\rho \in \mathbb{R}^{32}$ holding the magnitudes of the contact
//! force basis vectors, $A \in \mathbb{R}^{6 \times 32}$ mapping them to a
//! spatial wrench $W$, and $B \in \mathbb{R}^{2 \times 32}$ selecting the
//! normal force at each of two contacts.
//!
//! All dimensions are fixed at compile time and every solve reuses one
//! preallocated workspace.  See [`solver::Solver`] for the solver itself
//! and [`harness::Harness`] for the timing harness behind the
//! `testsolver` binary.
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

//Rust hates greek characters
#![allow(confusable_idents)]

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod algebra;
pub mod harness;
pub mod io;
pub mod solver;
pub mod timers;
