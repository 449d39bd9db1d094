#![allow(non_snake_case)]

use wrenchqp::{algebra::*, io::ConfigurablePrintTarget, solver::*};

fn quiet_settings() -> Settings<f64> {
    SettingsBuilder::default().verbose(false).build().unwrap()
}

fn default_solver() -> Solver<f64> {
    Solver::new(Params::default_data(), quiet_settings())
}

// minimize |rho|^2 subject to the first 16 entries summing to at
// least 1 and the last 16 summing to at least 2
fn equal_split_params() -> Params<f64> {
    let mut params = Params::<f64>::default();
    params.C = [1.0; NUM_WRENCH];
    params.epsilon = 1.0;
    for j in 0..NUM_RHO {
        let row = if j < NUM_RHO / 2 { 0 } else { 1 };
        params.B[row + j * NUM_CONTACTS] = 1.0;
    }
    params.fmin = [1.0, 2.0];
    params
}

#[test]
fn test_default_data_solves() {
    let mut solver = default_solver();
    let iters = solver.solve();

    assert_eq!(solver.info.status, SolverStatus::Solved);
    assert!(iters > 0 && iters <= solver.settings.max_iter);
    assert_eq!(solver.info.iterations, iters);
    let set = &solver.settings;
    assert!(
        solver.info.gap < set.tol_gap
            || solver.info.gap < set.tol_gap_rel * solver.info.cost.abs().max(1.0)
    );

    // feasible to within the residual tolerance
    let rho = &solver.vars.rho;
    assert!(solver.params.max_violation(rho) < 1e-5);

    // reported cost matches the objective at the reported solution
    let obj = solver.params.objective(rho);
    assert!((solver.info.cost - obj).abs() <= 1e-9 * (1.0 + obj.abs()));
}

#[test]
fn test_solve_is_deterministic() {
    let mut solver1 = default_solver();
    let mut solver2 = default_solver();

    let iters1 = solver1.solve();
    let iters2 = solver2.solve();
    assert_eq!(iters1, iters2);
    assert_eq!(solver1.vars, solver2.vars);

    // and a repeated solve on the same workspace changes nothing
    let iters3 = solver1.solve();
    assert_eq!(iters1, iters3);
    assert_eq!(solver1.vars, solver2.vars);
}

#[test]
fn test_zero_wrench() {
    let mut params = Params::default_data();
    params.W = [0.0; NUM_WRENCH];

    let settings = SettingsBuilder::default()
        .verbose(false)
        .max_iter(50)
        .build()
        .unwrap();
    let mut solver = Solver::new(params, settings);
    solver.solve();

    assert_eq!(solver.info.status, SolverStatus::Solved);
    assert!(solver.vars.rho.norm_inf() < 1e-2);
    assert!(solver.params.objective(&solver.vars.rho) < 1e-5);
}

#[test]
fn test_equal_split() {
    let mut solver = Solver::new(equal_split_params(), quiet_settings());
    solver.solve();

    assert_eq!(solver.info.status, SolverStatus::Solved);
    let (first, last) = solver.vars.rho.split_at(NUM_RHO / 2);
    assert!(first.iter().all(|&r| (r - 1.0 / 16.0).abs() < 1e-3));
    assert!(last.iter().all(|&r| (r - 2.0 / 16.0).abs() < 1e-3));
    assert!((solver.info.cost - 5.0 / 16.0).abs() < 1e-4);
}

#[test]
fn test_cold_start() {
    let settings = SettingsBuilder::default()
        .verbose(false)
        .better_start(false)
        .max_iter(50)
        .build()
        .unwrap();
    let mut solver = Solver::new(equal_split_params(), settings);
    solver.solve();

    assert_eq!(solver.info.status, SolverStatus::Solved);
    assert!(solver
        .vars
        .rho
        .iter()
        .all(|&r| r > 0.0 && r < 2.0 / 16.0 + 1e-3));
}

#[test]
fn test_iteration_limit() {
    let settings = SettingsBuilder::<f64>::default()
        .verbose(false)
        .max_iter(1)
        .build()
        .unwrap();
    let mut solver = Solver::new(Params::default_data(), settings);
    let iters = solver.solve();

    assert_eq!(iters, 1);
    assert_eq!(solver.info.status, SolverStatus::MaxIterations);
}

#[test]
fn test_time_limit() {
    let settings = SettingsBuilder::<f64>::default()
        .verbose(false)
        .time_limit(1e-12)
        .build()
        .unwrap();
    let mut solver = Solver::new(Params::default_data(), settings);
    let iters = solver.solve();

    assert_eq!(iters, 0);
    assert_eq!(solver.info.status, SolverStatus::MaxTime);
}

#[test]
fn test_bad_params() {
    let mut solver = default_solver();
    solver.params.A[11] = f64::NAN;
    let iters = solver.solve();

    assert_eq!(iters, 0);
    assert_eq!(solver.info.status, SolverStatus::NumericalError);

    // fixing the data makes the same solver usable again
    solver.params = Params::default_data();
    solver.solve();
    assert_eq!(solver.info.status, SolverStatus::Solved);
    assert!(solver.vars.rho.iter().any(|&r| r > 1e-3));
}

#[test]
fn test_bad_params_clears_previous_solution() {
    let mut solver = default_solver();
    solver.solve();
    assert_eq!(solver.info.status, SolverStatus::Solved);
    assert!(solver.info.cost > 0.0);

    solver.params.C[0] = -1.0;
    let iters = solver.solve();

    assert_eq!(iters, 0);
    assert_eq!(solver.info.status, SolverStatus::NumericalError);
    assert_eq!(solver.vars, Vars::default());
    assert_eq!(solver.info.cost, 0.0);
    assert_eq!(solver.info.gap, 0.0);
    assert_eq!(solver.info.res_primal, 0.0);
    assert_eq!(solver.info.res_dual, 0.0);
    assert_eq!(solver.info.μ, 0.0);
}

#[test]
fn test_single_precision() {
    let settings = SettingsBuilder::<f32>::default()
        .verbose(false)
        .build()
        .unwrap();
    let mut solver = Solver::<f32>::new(Params::default_data(), settings);
    let iters = solver.solve();

    assert_eq!(solver.info.status, SolverStatus::Solved);
    assert!(iters <= solver.settings.max_iter);
    assert!(solver.params.max_violation(&solver.vars.rho) < 1e-3);

    // agrees with the double precision solution
    let mut solver64 = default_solver();
    solver64.solve();
    let obj32 = f64::from(solver.params.objective(&solver.vars.rho));
    let obj64 = solver64.params.objective(&solver64.vars.rho);
    assert!((obj32 - obj64).abs() <= 1e-2 * (1.0 + obj64.abs()));
}

#[test]
fn test_large_data_scale() {
    let mut params = Params::<f64>::default_data();
    params.A.iter_mut().for_each(|a| *a *= 1e6);
    params.W.iter_mut().for_each(|w| *w *= 1e6);

    let settings = SettingsBuilder::default()
        .verbose(false)
        .max_iter(50)
        .build()
        .unwrap();
    let mut solver = Solver::new(params, settings);
    solver.solve();

    assert_eq!(solver.info.status, SolverStatus::Solved);
    assert!(solver.params.max_violation(&solver.vars.rho) < 1e-5);
}

#[test]
fn test_set_defaults() {
    let mut solver = default_solver();
    solver.settings.max_iter = 3;
    solver.set_defaults();
    solver.setup_indexing();
    assert_eq!(solver.settings, Settings::default());

    solver.print_to_sink();
    solver.solve();
    assert_eq!(solver.info.status, SolverStatus::Solved);
}

#[test]
fn test_verbose_output() {
    let settings = SettingsBuilder::<f64>::default()
        .verbose(true)
        .verbose_refinement(true)
        .verbose_timing(true)
        .build()
        .unwrap();
    let mut solver = Solver::new(Params::default_data(), settings);
    solver.print_to_buffer();
    solver.solve();

    let result = solver.get_print_buffer().unwrap();
    assert!(result.contains("wrenchqp v"));
    assert!(result.contains("variables     = 32"));
    assert!(result.contains("constraints   = 34"));
    assert!(result.contains("iter    pcost"));
    assert!(result.contains("refine:"));
    assert!(result.contains("Terminated with status = Solved"));
    assert!(result.contains("kkt factor"));

    let timers = solver.timers.as_ref().unwrap();
    assert!(timers.elapsed(&["solve", "IP iteration", "kkt factor"]).is_some());
}

#[test]
fn test_quiet_output() {
    let mut solver = default_solver();
    solver.print_to_buffer();
    solver.solve();
    assert!(solver.get_print_buffer().unwrap().is_empty());
}
