use super::settings::Settings;
use crate::algebra::*;

// ---------------------------------
// Solver status type
// ---------------------------------

/// Status of solver at termination

#[repr(u32)]
#[derive(PartialEq, Eq, Clone, Debug, Copy, Default)]
pub enum SolverStatus {
    /// Problem is not solved (solver hasn't run).
    #[default]
    Unsolved,
    /// Solver terminated with a solution.
    Solved,
    /// Iteration limit reached before a solution was found.
    MaxIterations,
    /// Time limit reached before a solution was found.
    MaxTime,
    /// Solver terminated with a numerical error
    NumericalError,
    /// Solver terminated due to lack of progress.
    InsufficientProgress,
}

impl SolverStatus {
    pub fn is_converged(&self) -> bool {
        matches!(*self, SolverStatus::Solved)
    }

    pub(crate) fn is_errored(&self) -> bool {
        // status is any of the error codes
        matches!(
            *self,
            SolverStatus::NumericalError | SolverStatus::InsufficientProgress
        )
    }
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Progress and termination information for the most recent solve

#[derive(Default, Debug, Clone)]
pub struct SolveInfo<T> {
    pub μ: T,
    pub sigma: T,
    pub step_length: T,
    pub iterations: u32,
    /// objective value at the current iterate
    pub cost: T,
    /// duality gap s'z
    pub gap: T,
    /// infinity norm of Gx + s - h
    pub res_primal: T,
    /// infinity norm of Px + q + G'z
    pub res_dual: T,
    /// ‖h‖∞, scales the primal residual tolerance
    pub norm_h: T,
    /// ‖q‖∞, scales the dual residual tolerance
    pub norm_q: T,
    pub solve_time: f64,
    pub status: SolverStatus,
}

impl<T> SolveInfo<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn save_scalars(&mut self, μ: T, α: T, σ: T, iter: u32) {
        self.μ = μ;
        self.step_length = α;
        self.sigma = σ;
        self.iterations = iter;
    }

    pub(crate) fn update(&mut self, cost: T, gap: T, rx: &[T], rz: &[T], solve_time: f64) {
        self.cost = cost;
        self.gap = gap;
        self.res_primal = rz.norm_inf();
        self.res_dual = rx.norm_inf();
        self.solve_time = solve_time;
    }

    /// Record the data norms that scale the feasibility tolerance
    pub(crate) fn set_data_norms(&mut self, q: &[T], h: &[T]) {
        self.norm_q = q.norm_inf();
        self.norm_h = h.norm_inf();
    }

    /// Set a final status if the current iterate is optimal or a limit
    /// has been reached.  Returns true if the solver should stop.
    pub(crate) fn check_termination(&mut self, settings: &Settings<T>, iter: u32) -> bool {
        if self.is_solved(settings) {
            self.status = SolverStatus::Solved;
        } else if !(self.gap.is_finite()
            && self.res_primal.is_finite()
            && self.res_dual.is_finite())
        {
            self.status = SolverStatus::NumericalError;
        } else if iter >= settings.max_iter {
            self.status = SolverStatus::MaxIterations;
        } else if self.solve_time > settings.time_limit {
            self.status = SolverStatus::MaxTime;
        }

        // return TRUE if we settled on a final status
        self.status != SolverStatus::Unsolved
    }

    pub(crate) fn set_status(&mut self, status: SolverStatus) {
        self.status = status;
    }

    // The gap test passes on either the absolute or the relative
    // tolerance.  The residuals are measured against the data scale,
    // which is 1 for data no larger than unit magnitude.
    fn is_solved(&self, settings: &Settings<T>) -> bool {
        let gap_ok = self.gap < settings.tol_gap
            || self.gap < settings.tol_gap_rel * T::max(T::one(), self.cost.abs());

        gap_ok
            && self.res_primal < settings.tol_feas * T::max(T::one(), self.norm_h)
            && self.res_dual < settings.tol_feas * T::max(T::one(), self.norm_q)
    }
}

#[test]
fn test_check_termination() {
    let settings = Settings::<f64>::default();
    let mut info = SolveInfo::<f64>::new();

    info.update(1.0, 1e-3, &[1e-9], &[1e-9], 0.0);
    assert!(!info.check_termination(&settings, 3));
    assert_eq!(info.status, SolverStatus::Unsolved);

    // converged wins over the iteration limit
    info.update(1.0, 1e-9, &[1e-9], &[-1e-9], 0.0);
    assert!(info.check_termination(&settings, settings.max_iter));
    assert_eq!(info.status, SolverStatus::Solved);
    assert!(info.status.is_converged());

    info.reset();
    info.update(1.0, 1e-3, &[1e-9], &[1e-9], 0.0);
    assert!(info.check_termination(&settings, settings.max_iter));
    assert_eq!(info.status, SolverStatus::MaxIterations);

    // a large cost lets the relative gap tolerance decide
    info.reset();
    info.update(1e6, 1e-3, &[1e-9], &[1e-9], 0.0);
    assert!(info.check_termination(&settings, 3));
    assert_eq!(info.status, SolverStatus::Solved);

    // residuals are measured against the data scale
    info.reset();
    info.set_data_norms(&[1e6, -2.0], &[0.0, 1.0]);
    info.update(1.0, 1e-9, &[1e-3], &[1e-9], 0.0);
    assert!(info.check_termination(&settings, 3));
    assert_eq!(info.status, SolverStatus::Solved);

    info.reset();
    assert_eq!(info.norm_q, 0.0);
    assert_eq!(info.cost, 0.0);
    info.update(1.0, f64::NAN, &[1e-9], &[1e-9], 0.0);
    assert!(info.check_termination(&settings, 1));
    assert!(info.status.is_errored());

    let settings = Settings::<f64> {
        time_limit: 1.0,
        ..Settings::default()
    };
    info.reset();
    info.update(1.0, 1e-3, &[1e-9], &[1e-9], 2.0);
    assert!(info.check_termination(&settings, 1));
    assert_eq!(info.status, SolverStatus::MaxTime);
}
