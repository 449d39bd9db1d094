use super::info::*;
use super::params::*;
use super::settings::Settings;
use super::variables::{Indexing, Vars};
use super::workspace::Workspace;
use crate::algebra::*;
use crate::io::{ConfigurablePrintTarget, PrintTarget};
use crate::timers::*;
use std::io::Write;

/// Interior point solver for the wrench distribution QP.
///
/// The solver owns its parameters, settings and output.  Fill in
/// `params`, call [`solve`](Solver::solve) and read the result
/// from `vars` and `info`.  The same solver can be reused for any
/// number of solves.  The workspace and timer tree are allocated
/// once and reused.
///
/// ```
/// use wrenchqp::solver::*;
///
/// let settings = SettingsBuilder::default().verbose(false).build().unwrap();
/// let mut solver = Solver::<f64>::new(Params::default_data(), settings);
/// let iters = solver.solve();
///
/// assert_eq!(solver.info.status, SolverStatus::Solved);
/// assert_eq!(solver.info.iterations, iters);
/// assert!(solver.vars.rho.iter().all(|&r| r >= -1e-6));
/// ```

pub struct Solver<T: FloatT> {
    pub params: Params<T>,
    pub vars: Vars<T>,
    pub settings: Settings<T>,
    pub info: SolveInfo<T>,
    pub timers: Option<Timers>,
    pub(crate) work: Workspace<T>,
    pub(crate) stream: PrintTarget,
}

impl<T> Solver<T>
where
    T: FloatT,
{
    pub fn new(params: Params<T>, settings: Settings<T>) -> Self {
        Self {
            params,
            vars: Vars::default(),
            settings,
            info: SolveInfo::new(),
            timers: Some(Timers::default()),
            work: Workspace::new(Indexing::new()),
            stream: PrintTarget::default(),
        }
    }

    /// Restore every setting to its default value
    pub fn set_defaults(&mut self) {
        self.settings = Settings::default();
    }

    /// Lay out the packed primal and slack/dual vectors and size
    /// the workspace to match
    pub fn setup_indexing(&mut self) {
        self.work = Workspace::new(Indexing::new());
    }

    /// Solve the problem defined by the current `params`.  Writes the
    /// solution to `vars` and the termination details to `info`, and
    /// returns the number of iterations taken.
    pub fn solve(&mut self) -> u32 {
        // various initializations
        let mut iter: u32 = 0;
        let mut σ = T::one();
        let mut α = T::zero();
        let mut μ = T::zero();
        let mut reprint = false;
        let mut params_ok = true;

        //timers is stored as an option so that
        //we can swap it out here and avoid
        //borrow conflicts with other fields.
        let mut timers = self.timers.take().unwrap_or_default();
        let stopwatch = tic();

        timers.reset_timer("solve");
        self.info.reset();

        notimeit! {timers; {
            let _ = self.print_banner();
            let _ = self.print_configuration();
        }}

        timeit! {timers => "solve"; {

        if let Err(e) = self.params.check() {
            self.info.set_status(SolverStatus::NumericalError);
            params_ok = false;
            let _ = self.print_params_error(&e);
        }

        timeit!{timers => "setup"; {
            self.work.data.update(&self.params, &self.work.idx);
            self.info.set_data_norms(&self.work.data.q, &self.work.data.h);
        }}

        // initialize variables to some reasonable starting point
        timeit!{timers => "default start"; {
            if !self.info.status.is_errored()
                && self.work.default_start(&self.settings).is_err()
            {
                self.info.set_status(SolverStatus::NumericalError);
            }
        }}

        notimeit!{timers; {
            let _ = self.print_status_header();
        }}

        timeit!{timers => "IP iteration"; {

        // ----------
        // main loop
        // ----------

        while !self.info.status.is_errored() {

            //update the residuals
            //--------------
            self.work.update_residuals();

            //calculate complementarity
            //--------------
            μ = self.work.it.calc_mu();

            // record scalar values from most recent iteration.
            // This captures μ at iteration zero.
            self.info.save_scalars(μ, α, σ, iter);

            // convergence check and printing
            // --------------
            self.info.update(
                self.work.cost(),
                self.work.gap(),
                &self.work.rx,
                &self.work.rz,
                stopwatch.tocq(),
            );

            notimeit!{timers; {
                let _ = self.print_status();
            }}

            if self.info.check_termination(&self.settings, iter) {
                break;
            }

            //increment counter here because we only count
            //iterations that produce a KKT update
            iter += 1;

            // Update the KKT system
            // --------------
            let is_kkt_success: bool;
            timeit!{timers => "kkt factor"; {
                is_kkt_success = self.work.kkt.update(
                    &self.work.data,
                    &self.work.idx,
                    &self.work.it,
                    self.settings.kkt_reg,
                ).is_ok();
            }}

            if !is_kkt_success {
                self.info.set_status(SolverStatus::NumericalError);
                α = T::zero();
                reprint = true;
                break;
            }

            // calculate the affine step
            // --------------
            timeit!{timers => "kkt solve"; {
                self.work.affine_step(self.settings.refine_steps);
            }}

            //calculate step length and centering parameter
            // --------------
            α = self.work.step_to_boundary(T::one());
            σ = centering_parameter(α);

            // calculate the combined step and length
            // --------------
            timeit!{timers => "kkt solve"; {
                self.work.combined_step(σ * μ, self.settings.refine_steps);
            }}

            notimeit!{timers; {
                let _ = self.print_refinement();
            }}

            α = self.settings.max_step_fraction * self.work.step_to_boundary(T::infinity());
            α = T::min(T::one(), α);

            // check for undersized step
            if !α.is_finite() || α <= self.settings.min_terminate_step_length {
                self.info.set_status(SolverStatus::InsufficientProgress);
                α = T::zero();
                reprint = true;
                break;
            }

            self.work.it.add_step(&self.work.step, α);

        } //end loop
        // ----------
        // ----------

        }} //end "IP iteration" timer

        }} // end "solve" timer

        // If we broke out without taking a final step we need
        // to recapture the scalars and print one last line
        if reprint {
            self.info.save_scalars(μ, α, σ, iter);
            notimeit! {timers; {let _ = self.print_status();}}
        }

        //store final solution, timing etc.  Rejected params
        //leave no solution behind.
        if params_ok {
            self.vars
                .rho
                .copy_from_slice(&self.work.it.x[self.work.idx.rho.clone()]);
        } else {
            self.vars.rho.set(T::zero());
        }
        self.info.iterations = iter;
        self.info.solve_time = stopwatch.tocq();

        let _ = self.print_footer();
        if self.settings.verbose && self.settings.verbose_timing {
            let _ = timers.print(&mut self.stream);
        }

        //stow the timers back into Option in the solver struct
        self.timers.replace(timers);

        iter
    }
}

fn centering_parameter<T: FloatT>(α: T) -> T {
    T::powi(T::one() - α, 3)
}

impl<T> ConfigurablePrintTarget for Solver<T>
where
    T: FloatT,
{
    fn print_to_stdout(&mut self) {
        self.stream.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.stream.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        self.stream.print_to_stream(stream)
    }
    fn print_to_sink(&mut self) {
        self.stream.print_to_sink()
    }
    fn print_to_buffer(&mut self) {
        self.stream.print_to_buffer()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.stream.get_print_buffer()
    }
}

#[test]
fn test_centering_parameter() {
    assert_eq!(centering_parameter(1.0), 0.0);
    assert_eq!(centering_parameter(0.0), 1.0);
    assert_eq!(centering_parameter(0.5), 0.125);
}
