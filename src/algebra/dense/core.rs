#![allow(non_snake_case)]

use crate::algebra::{FloatT, MatrixVectorMultiply, VectorMath};
use std::ops::{Index, IndexMut};

/// Dense matrix in column major format
///
/// __Example usage__ : To construct the 3 x 3 matrix
/// ```text
/// A = [1.  3.  5.]
///     [2.  0.  6.]
///     [0.  4.  7.]
/// ```
///
/// ```no_run
/// use wrenchqp::algebra::Matrix;
///
/// let A : Matrix<f64> = Matrix::new(
///    (3, 3),  //size as tuple
///    vec![1., 2., 0., 3., 0., 4., 5., 6., 7.]
///  );
///
/// assert_eq!(A[(2, 1)], 4.);
/// ```

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// vector of data in column major format
    pub data: Vec<T>,
}

impl<T> Matrix<T>
where
    T: FloatT,
{
    /// Construct from column major data.  Panics if the data length
    /// does not match the requested size.
    pub fn new(size: (usize, usize), data: Vec<T>) -> Self {
        let (m, n) = size;
        assert_eq!(m * n, data.len());
        Self { m, n, data }
    }

    pub fn zeros(size: (usize, usize)) -> Self {
        let (m, n) = size;
        Self::new(size, vec![T::zero(); m * n])
    }

    /// Construct from a column major slice, e.g. a fixed size
    /// parameter array
    pub fn from_col_major(size: (usize, usize), src: &[T]) -> Self {
        Self::new(size, src.to_vec())
    }

    /// Overwrite the contents with column major data of the same size
    pub fn copy_from_slice(&mut self, src: &[T]) {
        self.data.copy_from(src);
    }

    pub fn nrows(&self) -> usize {
        self.m
    }

    pub fn size(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    pub fn is_square(&self) -> bool {
        self.m == self.n
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Borrow column `j` as a slice
    pub fn col(&self, j: usize) -> &[T] {
        &self.data[j * self.m..(j + 1) * self.m]
    }

    /// Add `c` to every diagonal element
    pub fn shift_diagonal(&mut self, c: T) {
        assert!(self.is_square());
        for i in 0..self.n {
            self[(i, i)] += c;
        }
    }

    #[inline]
    fn index_linear(&self, idx: (usize, usize)) -> usize {
        idx.0 + self.m * idx.1
    }
}

impl<T> Index<(usize, usize)> for Matrix<T>
where
    T: FloatT,
{
    type Output = T;
    fn index(&self, idx: (usize, usize)) -> &Self::Output {
        &self.data[self.index_linear(idx)]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T>
where
    T: FloatT,
{
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut Self::Output {
        let lidx = self.index_linear(idx);
        &mut self.data[lidx]
    }
}

impl<T> MatrixVectorMultiply for Matrix<T>
where
    T: FloatT,
{
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        assert_eq!(self.n, x.len());
        assert_eq!(self.m, y.len());

        y.scale(b);
        for (j, &xj) in x.iter().enumerate() {
            let axj = a * xj;
            if axj == T::zero() {
                continue;
            }
            for (yi, &aij) in y.iter_mut().zip(self.col(j)) {
                *yi += aij * axj;
            }
        }
    }

    fn gemv_t(&self, y: &mut [T], x: &[T], a: T, b: T) {
        assert_eq!(self.m, x.len());
        assert_eq!(self.n, y.len());

        for (j, yj) in y.iter_mut().enumerate() {
            *yj = a * self.col(j).dot(x) + b * (*yj);
        }
    }
}

#[test]
fn test_matrix_indexing() {
    #[rustfmt::skip]
    let A = Matrix::new((2, 3), vec![1., 4., 2., 5., 3., 6.]);

    assert_eq!(A[(0, 0)], 1.);
    assert_eq!(A[(1, 0)], 4.);
    assert_eq!(A[(0, 2)], 3.);
    assert_eq!(A[(1, 2)], 6.);
    assert_eq!(A.col(1), &[2., 5.]);
}

#[test]
fn test_gemv() {
    // A = [1 2 3; 4 5 6]
    let A = Matrix::new((2, 3), vec![1., 4., 2., 5., 3., 6.]);

    let x = vec![1., 2., 3.];
    let mut y = vec![-1., -2.];
    A.gemv(&mut y, &x, 2.0, 3.0);
    assert_eq!(y, vec![25.0, 58.0]);

    let x = vec![1., 2.];
    let mut y = vec![-1., -2., -3.];
    A.gemv_t(&mut y, &x, 2.0, 3.0);
    assert_eq!(y, vec![15.0, 18.0, 21.0]);
}
