#![allow(non_snake_case)]
use crate::algebra::*;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};
#[cfg(feature = "serde")]
use serde_big_array::BigArray;

/// Rows of `A`, i.e. the dimension of a spatial wrench
pub const NUM_WRENCH: usize = 6;
/// Number of contact force basis vectors (decision variables)
pub const NUM_RHO: usize = 32;
/// Number of contacts, i.e. rows of `B`
pub const NUM_CONTACTS: usize = 2;
/// Length of the column major `A` parameter
pub const A_LEN: usize = NUM_WRENCH * NUM_RHO;
/// Length of the column major `B` parameter
pub const B_LEN: usize = NUM_CONTACTS * NUM_RHO;
/// Number of inequality constraints (`rho >= 0` and `B rho >= fmin`)
pub const NUM_INEQ: usize = NUM_RHO + NUM_CONTACTS;

/// Seed of the generator behind [`load_default_data`]
pub const DEFAULT_DATA_SEED: u64 = 0x5eed_c0de;

/// Error type returned by [`Params::check`]
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParamsError {
    #[error("parameter {name}[{index}] is not finite")]
    NonFinite { name: &'static str, index: usize },
    #[error("parameter {name}[{index}] must be non-negative")]
    Negative { name: &'static str, index: usize },
}

/// Problem parameters for the wrench distribution QP
///
/// $$
/// \begin{array}{rl}
/// \text{minimize} & (A\rho - W)^T \mathrm{diag}(C) (A\rho - W) + \epsilon\, \rho^T\rho \\\\
/// \text{subject to} & \rho \ge 0, \quad B\rho \ge f_{min}
/// \end{array}
/// $$
///
/// Matrices are stored column major, so `A[i + j*NUM_WRENCH]` is entry `(i,j)`.
/// All sizes are fixed.

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct Params<T> {
    /// wrench map, NUM_WRENCH x NUM_RHO
    #[cfg_attr(feature = "serde", serde(with = "BigArray"))]
    pub A: [T; A_LEN],
    /// normal force selection, NUM_CONTACTS x NUM_RHO
    #[cfg_attr(feature = "serde", serde(with = "BigArray"))]
    pub B: [T; B_LEN],
    /// diagonal wrench error weights
    pub C: [T; NUM_WRENCH],
    /// desired wrench
    pub W: [T; NUM_WRENCH],
    /// regularization weight on rho
    pub epsilon: T,
    /// minimum normal force per contact
    pub fmin: [T; NUM_CONTACTS],
}

impl<T> Default for Params<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self {
            A: [T::zero(); A_LEN],
            B: [T::zero(); B_LEN],
            C: [T::zero(); NUM_WRENCH],
            W: [T::zero(); NUM_WRENCH],
            epsilon: T::zero(),
            fmin: [T::zero(); NUM_CONTACTS],
        }
    }
}

impl<T> Params<T>
where
    T: FloatT,
{
    /// Parameters filled by [`load_default_data`]
    pub fn default_data() -> Self {
        let mut params = Self::default();
        load_default_data(&mut params);
        params
    }

    /// Checks that every value is finite and that the weights `C`
    /// and `epsilon` are non-negative, i.e. that the problem is convex.
    pub fn check(&self) -> Result<(), ParamsError> {
        check_finite("A", &self.A)?;
        check_finite("B", &self.B)?;
        check_finite("C", &self.C)?;
        check_finite("W", &self.W)?;
        check_finite("epsilon", &[self.epsilon])?;
        check_finite("fmin", &self.fmin)?;

        check_nonnegative("C", &self.C)?;
        check_nonnegative("epsilon", &[self.epsilon])?;
        Ok(())
    }

    /// `A` as a NUM_WRENCH x NUM_RHO matrix
    pub fn A_matrix(&self) -> Matrix<T> {
        Matrix::from_col_major((NUM_WRENCH, NUM_RHO), &self.A)
    }

    /// `B` as a NUM_CONTACTS x NUM_RHO matrix
    pub fn B_matrix(&self) -> Matrix<T> {
        Matrix::from_col_major((NUM_CONTACTS, NUM_RHO), &self.B)
    }

    /// Objective value at `rho`
    pub fn objective(&self, rho: &[T; NUM_RHO]) -> T {
        let mut err = [T::zero(); NUM_WRENCH];
        self.A_matrix().gemv(&mut err, rho, T::one(), T::zero());
        err.axpby(-T::one(), &self.W, T::one());

        let mut werr = err;
        werr.hadamard(&self.C);

        werr.dot(&err) + self.epsilon * rho.sumsq()
    }

    /// Largest violation of `rho >= 0` and `B rho >= fmin`.  Zero if feasible.
    pub fn max_violation(&self, rho: &[T; NUM_RHO]) -> T {
        let mut Brho = [T::zero(); NUM_CONTACTS];
        self.B_matrix().gemv(&mut Brho, rho, T::one(), T::zero());

        let bound = rho.iter().fold(T::zero(), |acc, &r| T::max(acc, -r));
        Brho.iter()
            .zip(&self.fmin)
            .fold(bound, |acc, (&b, &f)| T::max(acc, f - b))
    }
}

fn check_finite<T: FloatT>(name: &'static str, v: &[T]) -> Result<(), ParamsError> {
    match v.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(ParamsError::NonFinite { name, index }),
        None => Ok(()),
    }
}

fn check_nonnegative<T: FloatT>(name: &'static str, v: &[T]) -> Result<(), ParamsError> {
    match v.iter().position(|&x| x < T::zero()) {
        Some(index) => Err(ParamsError::Negative { name, index }),
        None => Ok(()),
    }
}

/// Fill every parameter with fixed, reproducible test data.
///
/// Values come from a [`Xoshiro256StarStar`] stream seeded with
/// [`DEFAULT_DATA_SEED`], drawn in the order `A, W, C, epsilon, B, fmin`.
/// `C` and `epsilon` are strictly positive and `fmin` is negative, so the
/// instance is strictly convex and `rho = 0` is feasible.
pub fn load_default_data<T: FloatT>(params: &mut Params<T>) {
    let mut rng = Xoshiro256StarStar::seed_from_u64(DEFAULT_DATA_SEED);
    let mut fill = |v: &mut [T], lo: f64, hi: f64| {
        for x in v.iter_mut() {
            *x = rng.gen_range(lo..hi).as_T();
        }
    };

    fill(&mut params.A[..], -2.0, 2.0);
    fill(&mut params.W[..], -2.0, 2.0);
    fill(&mut params.C[..], 1.0, 2.0);
    fill(std::slice::from_mut(&mut params.epsilon), 0.1, 1.0);
    fill(&mut params.B[..], -2.0, 2.0);
    fill(&mut params.fmin[..], -2.0, 0.0);
}

#[test]
fn test_default_data() {
    let p1 = Params::<f64>::default_data();
    let p2 = Params::<f64>::default_data();
    assert_eq!(p1, p2);
    assert!(p1.check().is_ok());

    assert!(p1.C.iter().all(|&c| (1.0..2.0).contains(&c)));
    assert!((0.1..1.0).contains(&p1.epsilon));
    assert!(p1.fmin.iter().all(|&f| (-2.0..0.0).contains(&f)));
    assert!(p1.A.iter().chain(&p1.B).all(|&a| (-2.0..2.0).contains(&a)));

    // every element written, so no exact zeros left behind
    assert!(p1.A.iter().chain(&p1.B).all(|&a| a != 0.0));

    // rho = 0 is feasible for the default data
    assert_eq!(p1.max_violation(&[0.0; NUM_RHO]), 0.0);
}

#[test]
fn test_params_check() {
    let mut params = Params::<f64>::default_data();
    params.B[7] = f64::NAN;
    assert_eq!(
        params.check(),
        Err(ParamsError::NonFinite { name: "B", index: 7 })
    );

    let mut params = Params::<f64>::default_data();
    params.C[3] = -1.0;
    assert_eq!(
        params.check(),
        Err(ParamsError::Negative { name: "C", index: 3 })
    );

    let mut params = Params::<f64>::default_data();
    params.epsilon = -0.5;
    assert_eq!(
        params.check(),
        Err(ParamsError::Negative {
            name: "epsilon",
            index: 0
        })
    );
}

#[test]
fn test_objective() {
    // A = [I 0], so A*rho picks out the first six entries
    let mut params = Params::<f64>::default();
    for i in 0..NUM_WRENCH {
        params.A[i + i * NUM_WRENCH] = 1.0;
    }
    params.C = [2.0; NUM_WRENCH];
    params.W = [1.0; NUM_WRENCH];
    params.epsilon = 0.5;

    let mut rho = [0.0; NUM_RHO];
    rho[0] = 3.0;
    rho[NUM_RHO - 1] = 1.0;

    // wrench error = (2,-1,-1,-1,-1,-1), weighted sum = 2*(4+5) = 18
    // regularization = 0.5 * (9 + 1) = 5
    assert!((params.objective(&rho) - 23.0).abs() < 1e-12);
}
