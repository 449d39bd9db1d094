#![cfg(feature = "serde")]

use std::io::{Seek, SeekFrom};
use wrenchqp::solver::*;

#[test]
fn test_json_io() {
    let settings = SettingsBuilder::default()
        .verbose(false)
        .max_iter(40)
        .build()
        .unwrap();
    let mut solver = Solver::<f64>::new(Params::default_data(), settings);
    solver.solve();

    // write the problem to a file
    let mut file = tempfile::tempfile().unwrap();
    solver.write_to_file(&mut file).unwrap();

    // read the problem from the file
    file.seek(SeekFrom::Start(0)).unwrap();
    let mut solver2 = Solver::<f64>::read_from_file(&mut file).unwrap();
    assert_eq!(solver.params, solver2.params);
    assert_eq!(solver.settings, solver2.settings);
    assert_eq!(solver2.settings.time_limit, f64::INFINITY);

    solver2.solve();
    assert_eq!(solver.vars, solver2.vars);
}

#[test]
fn test_json_bad_input() {
    use std::io::Write;

    let mut file = tempfile::tempfile().unwrap();
    file.write_all(b"{\"params\": 3}").unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    let result = Solver::<f64>::read_from_file(&mut file);
    assert!(matches!(result, Err(JsonError::Json(_))));
}
