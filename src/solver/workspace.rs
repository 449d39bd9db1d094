#![allow(non_snake_case)]
use super::kktsystem::KKTSystem;
use super::problemdata::ProblemData;
use super::settings::Settings;
use super::variables::{Indexing, Iterate};
use crate::algebra::*;
use itertools::izip;

/// Everything the interior point iteration needs besides the
/// user facing parameters and settings.  Sized once by
/// [`Solver::setup_indexing`](crate::solver::Solver::setup_indexing).

pub(crate) struct Workspace<T> {
    pub idx: Indexing,
    pub data: ProblemData<T>,
    pub kkt: KKTSystem<T>,

    pub it: Iterate<T>,
    pub step: Iterate<T>,

    // residuals and their by-products
    pub rx: Vec<T>,
    pub rz: Vec<T>,
    pub rs: Vec<T>,
    pub Px: Vec<T>,
}

impl<T> Workspace<T>
where
    T: FloatT,
{
    pub fn new(idx: Indexing) -> Self {
        let (n, m) = (idx.n, idx.m);
        Self {
            data: ProblemData::new(&idx),
            kkt: KKTSystem::new(&idx),
            it: Iterate::new(n, m),
            step: Iterate::new(n, m),
            rx: vec![T::zero(); n],
            rz: vec![T::zero(); m],
            rs: vec![T::zero(); m],
            Px: vec![T::zero(); n],
            idx,
        }
    }

    /// Initial iterate.  Either the least squares point of the
    /// unscaled KKT system shifted into the interior, or the cold
    /// start `(0, s_init, z_init)`.
    pub fn default_start(&mut self, settings: &Settings<T>) -> Result<(), DenseFactorizationError> {
        if !settings.better_start {
            self.it.x.set(T::zero());
            self.it.s.set(settings.s_init);
            self.it.z.set(settings.z_init);
            return Ok(());
        }

        self.kkt
            .update_identity(&self.data, &self.idx, settings.kkt_reg)?;

        // (P + G'G)x = -q + G'h
        self.rx.copy_from(&self.data.q);
        self.data
            .mul_Gt(&self.idx, &mut self.rx, &self.data.h, T::one(), -T::one());
        self.kkt
            .solve_reduced(&mut self.it.x, &self.rx, settings.refine_steps);

        // z = Gx - h, s = -z
        self.it.z.copy_from(&self.data.h);
        self.data
            .mul_G(&self.idx, &mut self.it.z, &self.it.x, T::one(), -T::one());
        self.it.s.scalarop_from(|v| -v, &self.it.z);

        Iterate::shift_to_interior(&mut self.it.s);
        Iterate::shift_to_interior(&mut self.it.z);
        Ok(())
    }

    /// Refresh `Px`, `rx = Px + q + G'z` and `rz = Gx + s - h`
    pub fn update_residuals(&mut self) {
        self.data
            .P
            .gemv(&mut self.Px, &self.it.x, T::one(), T::zero());

        self.rx.waxpby(T::one(), &self.Px, T::one(), &self.data.q);
        self.data
            .mul_Gt(&self.idx, &mut self.rx, &self.it.z, T::one(), T::one());

        self.rz.waxpby(T::one(), &self.it.s, -T::one(), &self.data.h);
        self.data
            .mul_G(&self.idx, &mut self.rz, &self.it.x, T::one(), T::one());
    }

    /// Objective value at the current iterate.  Needs fresh residuals.
    pub fn cost(&self) -> T {
        self.data.cost(&self.it.x, &self.Px)
    }

    /// Duality gap `s'z`
    pub fn gap(&self) -> T {
        self.it.s.dot(&self.it.z)
    }

    /// Affine scaling direction, i.e. the Newton step with `rs = s∘z`
    pub fn affine_step(&mut self, refine_steps: u32) {
        for (rs, &s, &z) in izip!(&mut self.rs, &self.it.s, &self.it.z) {
            *rs = s * z;
        }
        self.solve_step(refine_steps);
    }

    /// Mehrotra combined direction.  Must follow [`affine_step`](Self::affine_step),
    /// whose direction is still held in `step`.
    pub fn combined_step(&mut self, σμ: T, refine_steps: u32) {
        for (rs, &s, &z, &ds, &dz) in izip!(
            &mut self.rs,
            &self.it.s,
            &self.it.z,
            &self.step.s,
            &self.step.z
        ) {
            *rs = s * z + ds * dz - σμ;
        }
        self.solve_step(refine_steps);
    }

    fn solve_step(&mut self, refine_steps: u32) {
        self.kkt.solve_step(
            &self.data,
            &self.idx,
            &mut self.step,
            &self.it,
            &self.rx,
            &self.rz,
            &self.rs,
            refine_steps,
        );
    }

    /// Largest step in `(0, αmax]` along `step` that stays in the
    /// non-negative orthant
    pub fn step_to_boundary(&self, αmax: T) -> T {
        self.it.step_to_boundary(&self.step, αmax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::params::Params;

    fn workspace() -> Workspace<f64> {
        let params = Params::<f64>::default_data();
        let mut work = Workspace::new(Indexing::new());
        work.data.update(&params, &work.idx);
        work
    }

    #[test]
    fn test_better_start_is_interior() {
        let mut work = workspace();
        work.default_start(&Settings::default()).unwrap();
        assert!(work.it.s.minimum() > 0.0);
        assert!(work.it.z.minimum() > 0.0);

        // stationarity of the least squares point, i.e. Px + q + G'(Gx - h) = 0
        let mut z = work.data.h.clone();
        work.data.mul_G(&work.idx, &mut z, &work.it.x, 1.0, -1.0);
        let mut r = work.data.q.clone();
        work.data.P.gemv(&mut r, &work.it.x, 1.0, 1.0);
        work.data.mul_Gt(&work.idx, &mut r, &z, 1.0, 1.0);
        assert!(r.norm_inf() < 1e-8);
    }

    #[test]
    fn test_cold_start() {
        let mut work = workspace();
        let settings = Settings {
            better_start: false,
            s_init: 2.0,
            z_init: 0.5,
            ..Settings::default()
        };
        work.default_start(&settings).unwrap();
        assert!(work.it.x.iter().all(|&v| v == 0.0));
        assert!(work.it.s.iter().all(|&v| v == 2.0));
        assert!(work.it.z.iter().all(|&v| v == 0.5));

        // x = 0, so rz = s - h and rx = q + G'z
        work.update_residuals();
        for (i, &rz) in work.rz.iter().enumerate() {
            assert_eq!(rz, 2.0 - work.data.h[i]);
        }
        assert_eq!(work.cost(), work.data.r);
        assert_eq!(work.gap(), 34.0);
    }
}
