use super::params::*;
use crate::algebra::*;
use std::ops::Range;

/// Solver output, written by [`Solver::solve`](crate::solver::Solver::solve)

#[derive(Debug, Clone, PartialEq)]
pub struct Vars<T> {
    /// contact force basis vector magnitudes
    pub rho: [T; NUM_RHO],
}

impl<T> Default for Vars<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self {
            rho: [T::zero(); NUM_RHO],
        }
    }
}

/// Layout of the packed primal and slack/dual vectors.
///
/// The primal vector `x` holds `rho`.  The slack and dual vectors `s`
/// and `z` hold the `rho >= 0` rows followed by the `B rho >= fmin` rows.

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Indexing {
    pub rho: Range<usize>,
    pub nonneg: Range<usize>,
    pub fmin: Range<usize>,
    pub n: usize,
    pub m: usize,
}

impl Default for Indexing {
    fn default() -> Self {
        Self::new()
    }
}

impl Indexing {
    pub fn new() -> Self {
        let rho = 0..NUM_RHO;
        let nonneg = 0..NUM_RHO;
        let fmin = nonneg.end..(nonneg.end + NUM_CONTACTS);
        let n = rho.end;
        let m = fmin.end;
        debug_assert_eq!(m, NUM_INEQ);
        Self {
            rho,
            nonneg,
            fmin,
            n,
            m,
        }
    }
}

/// Primal-dual iterate `(x, s, z)`.  Also used to hold step directions.

#[derive(Debug, Clone, Default)]
pub(crate) struct Iterate<T> {
    pub x: Vec<T>,
    pub s: Vec<T>,
    pub z: Vec<T>,
}

impl<T> Iterate<T>
where
    T: FloatT,
{
    pub fn new(n: usize, m: usize) -> Self {
        Self {
            x: vec![T::zero(); n],
            s: vec![T::zero(); m],
            z: vec![T::zero(); m],
        }
    }

    /// Complementarity `s'z / m`
    pub fn calc_mu(&self) -> T {
        let m: T = self.s.len().as_T();
        self.s.dot(&self.z) / m
    }

    /// `self += α*step`
    pub fn add_step(&mut self, step: &Self, α: T) {
        self.x.axpby(α, &step.x, T::one());
        self.s.axpby(α, &step.s, T::one());
        self.z.axpby(α, &step.z, T::one());
    }

    /// Largest `α <= αmax` keeping `s + α*ds` and `z + α*dz` non-negative
    pub fn step_to_boundary(&self, step: &Self, αmax: T) -> T {
        let mut α = αmax;
        for (&v, &dv) in self.s.iter().zip(&step.s).chain(self.z.iter().zip(&step.z)) {
            if dv < T::zero() {
                α = T::min(α, -v / dv);
            }
        }
        α
    }

    /// Shift `v` into the strict interior of the non-negative orthant
    pub fn shift_to_interior(v: &mut [T]) {
        // same rule as CVXOPT's default initialization
        let α = -v.minimum();
        if α >= T::zero() {
            v.translate(T::one() + α);
        }
    }
}

#[test]
fn test_indexing() {
    let idx = Indexing::new();
    assert_eq!(idx.n, NUM_RHO);
    assert_eq!(idx.m, NUM_INEQ);
    assert_eq!(idx.nonneg.len() + idx.fmin.len(), idx.m);
    assert_eq!(idx.fmin.start, idx.nonneg.end);
}

#[test]
fn test_step_to_boundary() {
    let mut it = Iterate::<f64>::new(1, 3);
    it.s.copy_from_slice(&[1., 2., 3.]);
    it.z.copy_from_slice(&[1., 1., 1.]);

    let mut step = Iterate::<f64>::new(1, 3);
    step.s.copy_from_slice(&[-2., 1., -1.]);
    step.z.copy_from_slice(&[0., 0., -0.25]);
    assert_eq!(it.step_to_boundary(&step, 1.0), 0.5);

    // nothing decreasing, so the cap applies
    step.s.copy_from_slice(&[0., 1., 1.]);
    step.z.copy_from_slice(&[0., 0., 0.]);
    assert_eq!(it.step_to_boundary(&step, 1.0), 1.0);

    it.add_step(&step, 2.0);
    assert_eq!(it.s, vec![1., 4., 5.]);
    assert_eq!(it.calc_mu(), 10. / 3.);
}

#[test]
fn test_shift_to_interior() {
    let mut v = [1., -2., 0.5];
    Iterate::<f64>::shift_to_interior(&mut v);
    assert_eq!(v, [4., 1., 3.5]);

    // already interior, left alone
    let mut v = [1., 2.];
    Iterate::<f64>::shift_to_interior(&mut v);
    assert_eq!(v, [1., 2.]);
}
