#![allow(non_snake_case)]
use super::problemdata::ProblemData;
use super::variables::{Indexing, Iterate};
use crate::algebra::*;
use itertools::izip;

/// Reduced KKT system for the Newton steps.
///
/// Eliminating `ds` and `dz` from the linearized optimality conditions
/// leaves the n x n positive definite system
///
/// (P + G' diag(z/s) G) dx = -rx - G'(diag(z/s) rz - rs/s)
///
/// which is factored once per iteration by a dense Cholesky and then
/// reused for the affine and combined directions.

pub(crate) struct KKTSystem<T> {
    // unregularized matrix, used for iterative refinement
    K0: Matrix<T>,
    // regularized matrix handed to the factorization
    K: Matrix<T>,
    chol: CholeskyEngine<T>,

    // z/s
    w: Vec<T>,
    // w∘rz - rs/s
    u: Vec<T>,
    rhs: Vec<T>,
    Gdx: Vec<T>,
    work: Vec<T>,

    /// infinity norm of the refinement residual after each pass
    /// of the most recent solve
    pub refine_norms: Vec<T>,
}

impl<T> KKTSystem<T>
where
    T: FloatT,
{
    pub fn new(idx: &Indexing) -> Self {
        let (n, m) = (idx.n, idx.m);
        Self {
            K0: Matrix::zeros((n, n)),
            K: Matrix::zeros((n, n)),
            chol: CholeskyEngine::new(n),
            w: vec![T::zero(); m],
            u: vec![T::zero(); m],
            rhs: vec![T::zero(); n],
            Gdx: vec![T::zero(); m],
            work: vec![T::zero(); n],
            refine_norms: Vec::new(),
        }
    }

    /// Form and factor the KKT matrix for the scaling `z/s` of `it`.
    pub fn update(
        &mut self,
        data: &ProblemData<T>,
        idx: &Indexing,
        it: &Iterate<T>,
        reg: T,
    ) -> Result<(), DenseFactorizationError> {
        for (w, &z, &s) in izip!(&mut self.w, &it.z, &it.s) {
            *w = z / s;
        }
        self.factor(data, idx, reg)
    }

    /// Form and factor the KKT matrix with unit scaling, i.e.
    /// P + G'G.  Used for the initial point.
    pub fn update_identity(
        &mut self,
        data: &ProblemData<T>,
        idx: &Indexing,
        reg: T,
    ) -> Result<(), DenseFactorizationError> {
        self.w.set(T::one());
        self.factor(data, idx, reg)
    }

    fn factor(
        &mut self,
        data: &ProblemData<T>,
        idx: &Indexing,
        reg: T,
    ) -> Result<(), DenseFactorizationError> {
        self.K0.copy_from_slice(data.P.data());
        data.add_GtDG(idx, &mut self.K0, &self.w);

        self.K.copy_from_slice(self.K0.data());
        self.K.shift_diagonal(reg);

        self.chol.factor(&self.K)
    }

    /// Solve `K0 x = b` using the regularized factor plus
    /// `refine_steps` passes of iterative refinement.
    pub fn solve_reduced(&mut self, x: &mut [T], b: &[T], refine_steps: u32) {
        x.copy_from(b);
        self.chol.solve(x);

        self.refine_norms.clear();
        for _ in 0..refine_steps {
            // work = b - K0*x
            self.work.copy_from(b);
            self.K0.gemv(&mut self.work, x, -T::one(), T::one());
            self.refine_norms.push(self.work.norm_inf());

            self.chol.solve(&mut self.work);
            x.axpby(T::one(), &self.work, T::one());
        }
    }

    /// Compute a full Newton direction `step` at iterate `it`, given the
    /// dual residual `rx`, primal residual `rz` and complementarity
    /// right hand side `rs`.  The factorization must be current.
    #[allow(clippy::too_many_arguments)]
    pub fn solve_step(
        &mut self,
        data: &ProblemData<T>,
        idx: &Indexing,
        step: &mut Iterate<T>,
        it: &Iterate<T>,
        rx: &[T],
        rz: &[T],
        rs: &[T],
        refine_steps: u32,
    ) {
        // u = w∘rz - rs/s
        for (u, &w, &rz, &rs, &s) in izip!(&mut self.u, &self.w, rz, rs, &it.s) {
            *u = w * rz - rs / s;
        }

        // rhs = -rx - G'u
        self.rhs.copy_from(rx);
        data.mul_Gt(idx, &mut self.rhs, &self.u, -T::one(), -T::one());

        let rhs = std::mem::take(&mut self.rhs);
        self.solve_reduced(&mut step.x, &rhs, refine_steps);
        self.rhs = rhs;

        // dz = w∘(G dx) + u,  ds = -rz - G dx
        data.mul_G(idx, &mut self.Gdx, &step.x, T::one(), T::zero());
        step.z.copy_from(&self.Gdx);
        step.z.hadamard(&self.w);
        step.z.axpby(T::one(), &self.u, T::one());

        step.s.waxpby(-T::one(), rz, -T::one(), &self.Gdx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::params::*;

    #[test]
    fn test_newton_step_satisfies_linearization() {
        let params = Params::<f64>::default_data();
        let idx = Indexing::new();
        let mut data = ProblemData::new(&idx);
        data.update(&params, &idx);

        let mut it = Iterate::new(idx.n, idx.m);
        for (i, (s, z)) in it.s.iter_mut().zip(it.z.iter_mut()).enumerate() {
            *s = 1.0 + 0.1 * i as f64;
            *z = 2.0 - 0.03 * i as f64;
        }
        let rx: Vec<f64> = (0..idx.n).map(|i| (i as f64).cos()).collect();
        let rz: Vec<f64> = (0..idx.m).map(|i| (i as f64).sin()).collect();
        let rs: Vec<f64> = it.s.iter().zip(&it.z).map(|(s, z)| s * z).collect();

        let mut kkt = KKTSystem::new(&idx);
        kkt.update(&data, &idx, &it, 1e-7).unwrap();

        let mut step = Iterate::new(idx.n, idx.m);
        kkt.solve_step(&data, &idx, &mut step, &it, &rx, &rz, &rs, 3);

        // P dx + G'dz = -rx
        let mut r1 = rx.clone();
        data.P.gemv(&mut r1, &step.x, 1.0, 1.0);
        data.mul_Gt(&idx, &mut r1, &step.z, 1.0, 1.0);
        assert!(r1.norm_inf() < 1e-8);

        // G dx + ds = -rz
        let mut r2 = rz.clone();
        data.mul_G(&idx, &mut r2, &step.x, 1.0, 1.0);
        r2.axpby(1.0, &step.s, 1.0);
        assert!(r2.norm_inf() < 1e-8);

        // z∘ds + s∘dz = -rs
        for i in 0..idx.m {
            let r3 = it.z[i] * step.s[i] + it.s[i] * step.z[i] + rs[i];
            assert!(r3.abs() < 1e-8);
        }

        // refinement reduces the residual
        assert_eq!(kkt.refine_norms.len(), 3);
        assert!(kkt.refine_norms[2] <= kkt.refine_norms[0]);
    }
}
