use std::io::Write;
use std::time::{Duration, Instant};

/// Wall-clock stopwatch started by [`tic`].
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

/// Start a new stopwatch
pub fn tic() -> Stopwatch {
    Stopwatch {
        start: Instant::now(),
    }
}

impl Stopwatch {
    /// Elapsed time since [`tic`], in seconds.  Prints nothing.
    pub fn tocq(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    /// Elapsed time since [`tic`], in seconds, also written to `out`.
    pub fn toc(&self, out: &mut dyn Write) -> std::io::Result<f64> {
        let t = self.tocq();
        writeln!(out, "time taken: {:.3e} seconds.", t)?;
        Ok(t)
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[test]
fn test_stopwatch() {
    let sw = tic();
    std::thread::sleep(Duration::from_millis(1));
    let t1 = sw.tocq();
    assert!(t1 >= 1e-3);

    let mut buf = Vec::new();
    let t2 = sw.toc(&mut buf).unwrap();
    assert!(t2 >= t1);
    assert!(String::from_utf8(buf).unwrap().starts_with("time taken: "));
}
