use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{MlpError, Result};

/// Dense row-major matrix of `f64`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Every entry drawn independently and uniformly from [-1, 1].
    pub fn random<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen_range(-1.0..=1.0);
            }
        }

        res
    }

    /// Wraps nested rows, checking that the shape is exactly `rows × cols`.
    pub fn from_rows(
        data: Vec<Vec<f64>>,
        rows: usize,
        cols: usize,
        what: &'static str,
    ) -> Result<Matrix> {
        if data.len() != rows {
            return Err(MlpError::shape(what, data.len(), rows));
        }
        if let Some(bad) = data.iter().find(|row| row.len() != cols) {
            return Err(MlpError::shape(what, bad.len(), cols));
        }
        Ok(Matrix { rows, cols, data })
    }

    /// `self += other * factor`, element-wise.
    pub fn add_scaled(&mut self, other: &Matrix, factor: f64) {
        if self.rows != other.rows || self.cols != other.cols {
            panic!("Matrices are of incorrect sizes")
        }

        for (row, other_row) in self.data.iter_mut().zip(&other.data) {
            for (x, y) in row.iter_mut().zip(other_row) {
                *x += y * factor;
            }
        }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

/// Uniform [-1, 1] vector, the bias counterpart of [`Matrix::random`].
pub fn random_vec<R: Rng>(len: usize, rng: &mut R) -> Vec<f64> {
    (0..len).map(|_| rng.gen_range(-1.0..=1.0)).collect()
}

/// `dst += src * factor`, element-wise.
pub fn add_scaled_vec(dst: &mut [f64], src: &[f64], factor: f64) {
    assert_eq!(dst.len(), src.len(), "vectors are of incorrect sizes");
    for (x, y) in dst.iter_mut().zip(src) {
        *x += y * factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn random_stays_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(3);
        let m = Matrix::random(8, 5, &mut rng);
        assert_eq!(m.data.len(), 8);
        assert!(m.data.iter().all(|row| row.len() == 5));
        assert!(m.data.iter().flatten().all(|x| (-1.0..=1.0).contains(x)));
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]], 2, 2, "weights").unwrap_err();
        assert!(matches!(err, MlpError::ShapeMismatch { got: 1, expected: 2, .. }));

        let err = Matrix::from_rows(vec![vec![1.0, 2.0]], 2, 2, "weights").unwrap_err();
        assert!(matches!(err, MlpError::ShapeMismatch { got: 1, expected: 2, .. }));
    }

    #[test]
    fn add_scaled_accumulates() {
        let mut a = Matrix::zeros(1, 2);
        let b = Matrix::from_rows(vec![vec![2.0, -4.0]], 1, 2, "b").unwrap();
        a.add_scaled(&b, 0.5);
        assert_eq!(a.data, vec![vec![1.0, -2.0]]);

        let mut v = vec![1.0, 1.0];
        add_scaled_vec(&mut v, &[2.0, 4.0], 0.25);
        assert_eq!(v, vec![1.5, 2.0]);
    }
}
