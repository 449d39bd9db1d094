#![allow(non_snake_case)]
use super::params::*;
use super::variables::Indexing;
use crate::algebra::*;

/// Standard form data derived from [`Params`]:
///
/// minimize ½x'Px + q'x + r  subject to  Gx + s = h, s >= 0
///
/// with `G = [-I; -B]` and `h = [0; -fmin]`.  `G` is never formed
/// explicitly and is applied through the `Indexing` ranges instead.

#[derive(Debug, Clone)]
pub(crate) struct ProblemData<T> {
    pub P: Matrix<T>,
    pub q: Vec<T>,
    pub r: T,
    pub B: Matrix<T>,
    pub h: Vec<T>,
    pub n: usize,
}

impl<T> ProblemData<T>
where
    T: FloatT,
{
    pub fn new(idx: &Indexing) -> Self {
        Self {
            P: Matrix::zeros((idx.n, idx.n)),
            q: vec![T::zero(); idx.n],
            r: T::zero(),
            B: Matrix::zeros((idx.fmin.len(), idx.n)),
            h: vec![T::zero(); idx.m],
            n: idx.n,
        }
    }

    /// Refill everything from the current parameter values
    pub fn update(&mut self, params: &Params<T>, idx: &Indexing) {
        let two: T = (2.0).as_T();
        let A = &params.A;
        let a = |k: usize, j: usize| A[k + j * NUM_WRENCH];

        // P = 2(A' diag(C) A + εI)
        for j in 0..self.n {
            for i in j..self.n {
                let mut v = T::zero();
                for k in 0..NUM_WRENCH {
                    v += a(k, i) * params.C[k] * a(k, j);
                }
                v *= two;
                self.P[(i, j)] = v;
                self.P[(j, i)] = v;
            }
            self.P[(j, j)] += two * params.epsilon;
        }

        // q = -2 A' diag(C) W
        for (j, qj) in self.q.iter_mut().enumerate() {
            let mut v = T::zero();
            for k in 0..NUM_WRENCH {
                v += a(k, j) * params.C[k] * params.W[k];
            }
            *qj = -two * v;
        }

        // r = W' diag(C) W
        self.r = params
            .W
            .iter()
            .zip(&params.C)
            .fold(T::zero(), |acc, (&w, &c)| acc + c * w * w);

        self.B.copy_from_slice(&params.B);

        self.h[idx.nonneg.clone()].set(T::zero());
        self.h[idx.fmin.clone()].scalarop_from(|f| -f, &params.fmin);
    }

    /// Produces `y = a*G*x + b*y`
    pub fn mul_G(&self, idx: &Indexing, y: &mut [T], x: &[T], a: T, b: T) {
        let (ynn, yf) = (idx.nonneg.clone(), idx.fmin.clone());
        y[ynn].axpby(-a, &x[idx.rho.clone()], b);
        self.B.gemv(&mut y[yf], &x[idx.rho.clone()], -a, b);
    }

    /// Produces `y = a*G'*z + b*y`
    pub fn mul_Gt(&self, idx: &Indexing, y: &mut [T], z: &[T], a: T, b: T) {
        let yr = &mut y[idx.rho.clone()];
        yr.axpby(-a, &z[idx.nonneg.clone()], b);
        self.B.gemv_t(yr, &z[idx.fmin.clone()], -a, T::one());
    }

    /// Produces `K += G' diag(d) G`
    pub fn add_GtDG(&self, idx: &Indexing, K: &mut Matrix<T>, d: &[T]) {
        let dnn = &d[idx.nonneg.clone()];
        let df = &d[idx.fmin.clone()];

        for (i, &di) in idx.rho.clone().zip(dnn) {
            K[(i, i)] += di;
        }

        let B = &self.B;
        for j in idx.rho.clone() {
            for i in j..idx.rho.end {
                let mut v = T::zero();
                for (k, &dk) in df.iter().enumerate() {
                    v += B[(k, i)] * dk * B[(k, j)];
                }
                K[(i, j)] += v;
                if i != j {
                    K[(j, i)] += v;
                }
            }
        }
    }

    /// Objective value ½x'Px + q'x + r
    pub fn cost(&self, x: &[T], Px: &[T]) -> T {
        let half: T = (0.5).as_T();
        half * x.dot(Px) + self.q.dot(x) + self.r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dense_G(data: &ProblemData<f64>, idx: &Indexing) -> Matrix<f64> {
        let mut G = Matrix::zeros((idx.m, idx.n));
        for j in 0..idx.n {
            let mut e = vec![0.; idx.n];
            e[j] = 1.;
            let mut col = vec![0.; idx.m];
            data.mul_G(idx, &mut col, &e, 1.0, 0.0);
            for i in 0..idx.m {
                G[(i, j)] = col[i];
            }
        }
        G
    }

    #[test]
    fn test_standard_form() {
        let params = Params::<f64>::default_data();
        let idx = Indexing::new();
        let mut data = ProblemData::new(&idx);
        data.update(&params, &idx);

        // P symmetric, h = [0; -fmin]
        for i in 0..idx.n {
            for j in 0..idx.n {
                assert_eq!(data.P[(i, j)], data.P[(j, i)]);
            }
        }
        assert!(data.h[idx.nonneg.clone()].iter().all(|&v| v == 0.));
        assert_eq!(data.h[idx.fmin.start], -params.fmin[0]);

        // ½x'Px + q'x + r reproduces the wrench objective
        let x: [f64; NUM_RHO] = std::array::from_fn(|i| (i as f64 * 0.37).sin());
        let mut Px = vec![0.; idx.n];
        data.P.gemv(&mut Px, &x, 1.0, 0.0);
        let cost = data.cost(&x, &Px);
        assert!((cost - params.objective(&x)).abs() < 1e-10);
    }

    #[test]
    fn test_structural_G() {
        let params = Params::<f64>::default_data();
        let idx = Indexing::new();
        let mut data = ProblemData::new(&idx);
        data.update(&params, &idx);
        let G = dense_G(&data, &idx);

        // G = [-I; -B]
        assert_eq!(G[(3, 3)], -1.);
        assert_eq!(G[(3, 4)], 0.);
        assert_eq!(G[(idx.fmin.start + 1, 5)], -params.B[1 + 5 * NUM_CONTACTS]);

        // G' against the dense transpose
        let z: Vec<f64> = (0..idx.m).map(|i| 1.0 + i as f64).collect();
        let mut y1 = vec![1.; idx.n];
        let mut y2 = y1.clone();
        data.mul_Gt(&idx, &mut y1, &z, 2.0, -1.0);
        G.gemv_t(&mut y2, &z, 2.0, -1.0);
        y1.axpby(-1., &y2, 1.);
        assert!(y1.norm_inf() < 1e-12);

        // G' diag(d) G against dense products
        let d: Vec<f64> = (0..idx.m).map(|i| 0.5 + i as f64).collect();
        let mut K = Matrix::zeros((idx.n, idx.n));
        data.add_GtDG(&idx, &mut K, &d);
        for i in 0..idx.n {
            for j in 0..idx.n {
                let v: f64 = (0..idx.m).map(|k| G[(k, i)] * d[k] * G[(k, j)]).sum();
                assert!((K[(i, j)] - v).abs() < 1e-12);
            }
        }
    }
}
