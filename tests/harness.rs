use wrenchqp::{harness::*, io::ConfigurablePrintTarget, solver::SolverStatus};

#[test]
fn test_zero_tests_skips_timing() {
    let mut harness = Harness::<f64>::new(0);
    harness.solver.print_to_buffer();

    let mut out = Vec::new();
    let report = harness.run(&mut out).unwrap();

    assert!(out.is_empty());
    assert!(report.timing.is_none());
    assert_eq!(report.status, SolverStatus::Solved);
    assert!(report.iterations > 0);

    // the verbose solve for the record still happens
    let log = harness.solver.get_print_buffer().unwrap();
    assert!(log.contains("Terminated with status = Solved"));
}

#[test]
fn test_timed_solves() {
    let mut harness = Harness::<f64>::new(3);
    harness.solver.print_to_buffer();

    let mut out = Vec::new();
    let report = harness.run(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let timing = report.timing.unwrap();
    assert_eq!(timing.num_tests, 3);
    assert!(timing.total_time > 0.0);
    assert_eq!(timing.time_per_solve(), timing.total_time / 3.0);

    let mut lines = text.lines();
    let first = lines.next().unwrap();
    assert!(first.starts_with("Timed 3 solves over "));
    assert!(first.ends_with(" seconds."));

    let second = lines.next().unwrap();
    let suffix = format!(" {}.", timing.unit().suffix());
    assert!(second.starts_with("Actual time taken per solve: "));
    assert!(second.ends_with(&suffix));
    assert!(lines.next().is_none());

    // timed solves are quiet, so only the record solve printed a footer
    let log = harness.solver.get_print_buffer().unwrap();
    assert_eq!(log.matches("Terminated with status").count(), 1);
    assert_eq!(report.status, SolverStatus::Solved);
}

#[test]
fn test_harness_loads_default_data() {
    let harness = Harness::<f64>::new(NUMTESTS);
    assert_eq!(harness.num_tests, 10000);
    assert_eq!(
        harness.solver.params,
        wrenchqp::solver::Params::default_data()
    );
}

#[test]
fn test_single_precision_harness() {
    let mut harness = Harness::<f32>::new(2);
    harness.solver.print_to_sink();

    let mut out = Vec::new();
    let report = harness.run(&mut out).unwrap();

    assert_eq!(report.status, SolverStatus::Solved);
    assert_eq!(report.timing.map(|t| t.num_tests), Some(2));
}
