//! Basic test harness: one verbose solve of the default problem
//! instance for the record, then a batch of timed solves.

use std::io::stdout;
use wrenchqp::harness::{Harness, NUMTESTS};

fn main() {
    let mut harness = Harness::<f64>::new(NUMTESTS);
    if let Err(e) = harness.run(&mut stdout()) {
        eprintln!("testsolver: failed to write results: {e}");
    }
}
