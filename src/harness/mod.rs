//! Timing harness.
//!
//! Solves the default problem instance once verbosely for the record,
//! then repeatedly and quietly to measure the average time per solve.

use crate::algebra::*;
use crate::solver::*;
use crate::timers::tic;
use std::io::Write;

/// Number of timed solves made by the `testsolver` binary
pub const NUMTESTS: u32 = 10000;

/// Units used to report the time taken per solve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Milliseconds,
    Microseconds,
}

impl TimeUnit {
    /// Unit for a duration of `seconds`.  Boundaries belong to the
    /// larger unit, so exactly 1 s reports in seconds and exactly
    /// 1 ms in milliseconds.
    pub fn for_time(seconds: f64) -> Self {
        if seconds >= 1.0 {
            TimeUnit::Seconds
        } else if seconds >= 1e-3 {
            TimeUnit::Milliseconds
        } else {
            TimeUnit::Microseconds
        }
    }

    /// Multiplier converting seconds to this unit
    pub fn scale(&self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Milliseconds => 1e3,
            TimeUnit::Microseconds => 1e6,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            TimeUnit::Seconds => "s",
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Microseconds => "us",
        }
    }
}

/// Wall clock measurement of a batch of quiet solves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub num_tests: u32,
    /// seconds
    pub total_time: f64,
}

impl Timing {
    /// Average seconds per solve
    pub fn time_per_solve(&self) -> f64 {
        self.total_time / f64::from(self.num_tests)
    }

    pub fn unit(&self) -> TimeUnit {
        TimeUnit::for_time(self.time_per_solve())
    }

    /// Write the two line timing summary
    pub fn write_summary(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(
            out,
            "Timed {} solves over {:.3} seconds.",
            self.num_tests, self.total_time
        )?;
        writeln!(
            out,
            "Actual time taken per solve: {}.",
            format_time_per_solve(self.time_per_solve())
        )
    }
}

/// Outcome of [`Harness::run`]
#[derive(Debug, Clone, PartialEq)]
pub struct TimingReport {
    /// iterations taken by the most recent solve
    pub iterations: u32,
    /// status of the most recent solve
    pub status: SolverStatus,
    /// `None` when the harness was asked for zero timed solves
    pub timing: Option<Timing>,
}

/// A solver loaded with the default problem instance plus the
/// number of timed solves to make
pub struct Harness<T: FloatT> {
    pub solver: Solver<T>,
    pub num_tests: u32,
}

impl<T> Harness<T>
where
    T: FloatT,
{
    pub fn new(num_tests: u32) -> Self {
        let mut solver = Solver::new(Params::default(), Settings::default());
        solver.set_defaults();
        solver.setup_indexing();
        load_default_data(&mut solver.params);

        Self { solver, num_tests }
    }

    /// Solve once verbosely, then `num_tests` times quietly under a
    /// stopwatch.  Solver output goes to the solver's own print target
    /// and the timing summary to `out`.
    pub fn run(&mut self, out: &mut dyn Write) -> std::io::Result<TimingReport> {
        // solve problem instance for the record
        self.solver.settings.verbose = true;
        let mut iterations = self.solver.solve();

        if self.num_tests == 0 {
            return Ok(self.report(iterations, None));
        }

        // now solve multiple problem instances for timing purposes
        self.solver.settings.verbose = false;
        let stopwatch = tic();
        for _ in 0..self.num_tests {
            iterations = self.solver.solve();
        }
        let timing = Timing {
            num_tests: self.num_tests,
            total_time: stopwatch.tocq(),
        };

        timing.write_summary(out)?;
        Ok(self.report(iterations, Some(timing)))
    }

    fn report(&self, iterations: u32, timing: Option<Timing>) -> TimingReport {
        TimingReport {
            iterations,
            status: self.solver.info.status,
            timing,
        }
    }
}

/// Time per solve scaled to a readable unit, e.g. `"12.3 us"`
pub fn format_time_per_solve(seconds: f64) -> String {
    let unit = TimeUnit::for_time(seconds);
    format!("{} {}", format_sig(seconds * unit.scale(), 3), unit.suffix())
}

/// Format `v` with `sig` significant digits using the rules of
/// C's `%g`: fixed notation unless the exponent is below -4 or at
/// least `sig`, and no trailing zeros.
pub fn format_sig(v: f64, sig: usize) -> String {
    if v == 0.0 || !v.is_finite() {
        return format!("{v}");
    }
    let p = sig.max(1);

    // exponent after rounding to p digits
    let estr = format!("{:.*e}", p - 1, v);
    let Some((mantissa, exp)) = estr.split_once('e') else {
        return estr;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= p as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", strip_trailing_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (p as i32 - 1 - exp) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, v)).to_string()
    }
}

fn strip_trailing_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_boundaries() {
        assert_eq!(TimeUnit::for_time(1.0), TimeUnit::Seconds);
        assert_eq!(TimeUnit::for_time(2.5), TimeUnit::Seconds);
        assert_eq!(TimeUnit::for_time(0.999), TimeUnit::Milliseconds);
        assert_eq!(TimeUnit::for_time(1e-3), TimeUnit::Milliseconds);
        assert_eq!(TimeUnit::for_time(0.000_999_9), TimeUnit::Microseconds);
        assert_eq!(TimeUnit::for_time(0.0), TimeUnit::Microseconds);
    }

    #[test]
    fn test_format_sig() {
        assert_eq!(format_sig(12.3456, 3), "12.3");
        assert_eq!(format_sig(2.5, 3), "2.5");
        assert_eq!(format_sig(100.0, 3), "100");
        assert_eq!(format_sig(0.000123, 3), "0.000123");
        assert_eq!(format_sig(1234.5, 3), "1.23e+03");
        assert_eq!(format_sig(999.6, 3), "1e+03");
        assert_eq!(format_sig(1.5e-7, 3), "1.5e-07");
        assert_eq!(format_sig(0.0, 3), "0");
    }

    #[test]
    fn test_format_time_per_solve() {
        assert_eq!(format_time_per_solve(1.0), "1 s");
        assert_eq!(format_time_per_solve(1e-3), "1 ms");
        assert_eq!(format_time_per_solve(0.0123), "12.3 ms");
        assert_eq!(format_time_per_solve(4.56e-5), "45.6 us");
    }

    #[test]
    fn test_timing_summary() {
        let timing = Timing {
            num_tests: 10000,
            total_time: 0.5,
        };
        assert_eq!(timing.time_per_solve(), 0.5 / 10000.0);
        assert_eq!(timing.unit(), TimeUnit::Microseconds);

        let mut buf = Vec::new();
        timing.write_summary(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "Timed 10000 solves over 0.500 seconds.\nActual time taken per solve: 50 us.\n"
        );
    }
}
