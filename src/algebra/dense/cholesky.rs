#![allow(non_snake_case)]

use crate::algebra::{DenseFactorizationError, FloatT, Matrix};

pub(crate) struct CholeskyEngine<T> {
    /// lower triangular factor (stored as square dense)
    pub L: Matrix<T>,
}

impl<T> CholeskyEngine<T>
where
    T: FloatT,
{
    pub fn new(n: usize) -> Self {
        let L = Matrix::<T>::zeros((n, n));
        Self { L }
    }

    //  Left-looking cholesky decomposition without pivoting.
    //  Only the lower triangle of A is read.  Returns an error
    //  for a non-positive pivot and the factor is left incomplete.

    pub fn factor(&mut self, A: &Matrix<T>) -> Result<(), DenseFactorizationError> {
        if A.size() != self.L.size() || !A.is_square() {
            return Err(DenseFactorizationError::IncompatibleDimension);
        }

        let n = A.nrows();
        let L = &mut self.L;

        for j in 0..n {
            let mut d = A[(j, j)];
            for k in 0..j {
                d -= L[(j, k)] * L[(j, k)];
            }
            if !(d > T::zero()) {
                // positive value k means non-positive pivot leading minor k
                return Err(DenseFactorizationError::Cholesky((j + 1) as i32));
            }
            let ljj = d.sqrt();
            L[(j, j)] = ljj;

            for i in (j + 1)..n {
                let mut t = A[(i, j)];
                for k in 0..j {
                    t -= L[(i, k)] * L[(j, k)];
                }
                L[(i, j)] = t / ljj;
            }
            // keep the strict upper triangle clean
            for i in 0..j {
                L[(i, j)] = T::zero();
            }
        }
        Ok(())
    }

    // Forward/backward substitution for the Cholesky factor.
    // Overwrites b with the solution of L*L^T x = b

    pub fn solve(&self, b: &mut [T]) {
        let L = &self.L;
        let n = L.nrows();
        assert_eq!(b.len(), n);

        // Forward substitution: Solve Lc = b
        for i in 0..n {
            let mut t = b[i];
            for k in 0..i {
                t -= L[(i, k)] * b[k];
            }
            b[i] = t / L[(i, i)];
        }

        // Backward substitution: Solve L^T x = c
        for i in (0..n).rev() {
            let mut t = b[i];
            for k in (i + 1)..n {
                t -= L[(k, i)] * b[k];
            }
            b[i] = t / L[(i, i)];
        }
    }
}

#[test]
fn test_cholesky() {
    use crate::algebra::{MatrixVectorMultiply, VectorMath};

    #[rustfmt::skip]
    let S = Matrix::new((3, 3),
        vec![ 8., -2., 4.,
             -2., 12., 2.,
              4.,  2., 6.]);

    let mut eng = CholeskyEngine::<f64>::new(3);
    assert!(eng.factor(&S).is_ok());

    // check that L*L^T reproduces S
    for i in 0..3 {
        for j in 0..3 {
            let mut v = 0.;
            for k in 0..3 {
                v += eng.L[(i, k)] * eng.L[(j, k)];
            }
            assert!((v - S[(i, j)]).abs() < 1e-12);
        }
    }

    let xtrue = vec![1., -2., 3.];
    let mut b = vec![0.; 3];
    S.gemv(&mut b, &xtrue, 1.0, 0.0);
    eng.solve(&mut b);
    b.axpby(-1., &xtrue, 1.);
    assert!(b.norm_inf() < 1e-12);
}

#[test]
fn test_cholesky_indefinite() {
    let S = Matrix::new((2, 2), vec![1., 2., 2., 1.]);
    let mut eng = CholeskyEngine::<f64>::new(2);
    assert_eq!(
        eng.factor(&S),
        Err(DenseFactorizationError::Cholesky(2))
    );

    let mut eng = CholeskyEngine::<f64>::new(3);
    assert_eq!(
        eng.factor(&S),
        Err(DenseFactorizationError::IncompatibleDimension)
    );
}
