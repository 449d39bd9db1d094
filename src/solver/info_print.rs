use super::params::*;
use super::solver::Solver;
use crate::algebra::*;
use std::io::Write;
use std::time::Duration;

macro_rules! expformat {
    ($fmt:expr,$val:expr) => {
        if $val.is_finite() {
            _exp_str_reformat(format!($fmt, $val))
        } else {
            format!($fmt, $val)
        }
    };
}

const RULE: &str = "-------------------------------------------------------------------";

impl<T> Solver<T>
where
    T: FloatT,
{
    pub(crate) fn print_banner(&mut self) -> std::io::Result<()> {
        if !self.settings.verbose {
            return Ok(());
        }
        let out = &mut self.stream;

        writeln!(out, "{RULE}")?;
        writeln!(
            out,
            "   wrenchqp v{}  -  fixed size contact wrench distribution QP",
            crate::VERSION
        )?;
        writeln!(out, "{RULE}")?;
        Ok(())
    }

    pub(crate) fn print_configuration(&mut self) -> std::io::Result<()> {
        if !self.settings.verbose {
            return Ok(());
        }
        let idx = &self.work.idx;
        let set = &self.settings;
        let out = &mut self.stream;

        writeln!(out, "\nproblem:")?;
        writeln!(out, "  variables     = {}", idx.n)?;
        writeln!(out, "  constraints   = {}", idx.m)?;
        writeln!(out, "    : rho >= 0      = {}", idx.nonneg.len())?;
        writeln!(out, "    : B*rho >= fmin = {}", idx.fmin.len())?;
        writeln!(out, "  wrench dim    = {}", NUM_WRENCH)?;
        writeln!(out)?;

        writeln!(out, "settings:")?;
        write!(out, "  linear algebra: direct / dense cholesky, ")?;
        writeln!(out, "precision: {} bit", _get_precision_string::<T>())?;

        let time_lim_str = {
            if set.time_limit.is_infinite() {
                "Inf".to_string()
            } else {
                format!("{:?}", set.time_limit)
            }
        };
        writeln!(
            out,
            "  max iter = {}, time limit = {},  max step = {:.3}",
            set.max_iter, time_lim_str, set.max_step_fraction
        )?;
        writeln!(
            out,
            "  tol_feas = {:.1e}, tol_gap = {:.1e}, tol_gap_rel = {:.1e}",
            set.tol_feas, set.tol_gap, set.tol_gap_rel
        )?;
        writeln!(
            out,
            "  kkt reg = {:.1e}, iter refine = {}, min step = {:.1e}",
            set.kkt_reg, set.refine_steps, set.min_terminate_step_length
        )?;
        if set.better_start {
            writeln!(out, "  start: least squares")?;
        } else {
            writeln!(
                out,
                "  start: cold, s = {:.1e}, z = {:.1e}",
                set.s_init, set.z_init
            )?;
        }
        writeln!(out)?;
        Ok(())
    }

    pub(crate) fn print_params_error(&mut self, e: &ParamsError) -> std::io::Result<()> {
        if !self.settings.verbose {
            return Ok(());
        }
        writeln!(self.stream, "bad parameters: {e}")
    }

    pub(crate) fn print_status_header(&mut self) -> std::io::Result<()> {
        if !self.settings.verbose {
            return Ok(());
        }
        let out = &mut self.stream;

        //print a subheader for the iterations info
        write!(out, "iter    ")?;
        write!(out, "pcost        ")?;
        write!(out, "gap       ")?;
        write!(out, "pres      ")?;
        write!(out, "dres      ")?;
        write!(out, " μ       ")?;
        write!(out, "step      ")?;
        writeln!(out)?;
        writeln!(out, "{RULE}")?;
        out.flush()?;
        Ok(())
    }

    pub(crate) fn print_status(&mut self) -> std::io::Result<()> {
        if !self.settings.verbose {
            return Ok(());
        }
        let info = &self.info;
        let out = &mut self.stream;

        write!(out, "{:>3}  ", info.iterations)?;
        write!(out, "{}  ", expformat!("{:+8.4e}", info.cost))?;
        write!(out, "{}  ", expformat!("{:6.2e}", info.gap))?;
        write!(out, "{}  ", expformat!("{:6.2e}", info.res_primal))?;
        write!(out, "{}  ", expformat!("{:6.2e}", info.res_dual))?;
        write!(out, "{}  ", expformat!("{:6.2e}", info.μ))?;

        if info.iterations > 0 {
            write!(out, "{}  ", expformat!("{:>.2e}", info.step_length))?;
        } else {
            write!(out, " ------   ")?; //info.step_length
        }

        writeln!(out)?;
        Ok(())
    }

    pub(crate) fn print_refinement(&mut self) -> std::io::Result<()> {
        if !(self.settings.verbose && self.settings.verbose_refinement) {
            return Ok(());
        }
        let norms = &self.work.kkt.refine_norms;
        let out = &mut self.stream;

        write!(out, "     refine:")?;
        for norm in norms {
            write!(out, " {}", expformat!("{:.2e}", *norm))?;
        }
        writeln!(out)?;
        Ok(())
    }

    pub(crate) fn print_footer(&mut self) -> std::io::Result<()> {
        if !self.settings.verbose {
            return Ok(());
        }
        let info = &self.info;
        let out = &mut self.stream;

        writeln!(out, "{RULE}")?;
        writeln!(out, "Terminated with status = {}", info.status)?;
        writeln!(out, "iterations = {}", info.iterations)?;
        writeln!(
            out,
            "solve time = {:?}",
            Duration::from_secs_f64(info.solve_time)
        )?;
        Ok(())
    }
}

fn _get_precision_string<T: FloatT>() -> String {
    (::std::mem::size_of::<T>() * 8).to_string()
}

// convert a string in LowerExp display format into one that
// 1) always has a sign after the exponent, and
// 2) has at least two digits in the exponent.
fn _exp_str_reformat(mut thestr: String) -> String {
    let Some(eidx) = thestr.find('e') else {
        return thestr;
    };
    let has_sign = thestr[eidx + 1..].starts_with('-');

    let has_short_exp = {
        if !has_sign {
            thestr.len() == eidx + 2
        } else {
            thestr.len() == eidx + 3
        }
    };

    let chars = match (has_sign, has_short_exp) {
        (false, true) => "+0",
        (false, false) => "+",
        (true, true) => "0",
        (true, false) => "",
    };

    let shift = if has_sign { 2 } else { 1 };
    thestr.insert_str(eidx + shift, chars);
    thestr
}

#[test]
fn test_exp_str_reformat() {
    assert_eq!(_exp_str_reformat(format!("{:.2e}", 1.5e-3)), "1.50e-03");
    assert_eq!(_exp_str_reformat(format!("{:.2e}", 2.0e12)), "2.00e+12");
    assert_eq!(_exp_str_reformat(format!("{:+8.4e}", -3.0)), "-3.0000e+00");
    assert_eq!(_exp_str_reformat("inf".to_string()), "inf");
}
