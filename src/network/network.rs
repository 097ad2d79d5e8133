use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::activation::sigmoid;
use crate::error::{MlpError, Result};
use crate::math::matrix::{random_vec, Matrix};

/// A single-hidden-layer perceptron with sigmoid activations on both layers.
///
/// `weights_ih` is `input_size × hidden_size`, `weights_ho` is
/// `hidden_size × output_size`. The constructors guarantee these shapes; the
/// fields stay public so the trainer can update them in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
    pub weights_ih: Matrix,
    pub biases_h: Vec<f64>,
    pub weights_ho: Matrix,
    pub biases_o: Vec<f64>,
}

impl Network {
    /// Builds a network with every weight and bias drawn uniformly from [-1, 1].
    pub fn new<R: Rng>(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        rng: &mut R,
    ) -> Network {
        let weights_ih = Matrix::random(input_size, hidden_size, rng);
        let biases_h = random_vec(hidden_size, rng);
        let weights_ho = Matrix::random(hidden_size, output_size, rng);
        let biases_o = random_vec(output_size, rng);

        Network {
            input_size,
            hidden_size,
            output_size,
            weights_ih,
            biases_h,
            weights_ho,
            biases_o,
        }
    }

    /// Same as [`Network::new`] with a reproducible `StdRng`.
    pub fn seeded(input_size: usize, hidden_size: usize, output_size: usize, seed: u64) -> Network {
        let mut rng = StdRng::seed_from_u64(seed);
        Network::new(input_size, hidden_size, output_size, &mut rng)
    }

    /// Builds a network from explicit parameters, rejecting any shape that
    /// disagrees with the declared sizes.
    pub fn from_parts(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        weights_ih: Vec<Vec<f64>>,
        biases_h: Vec<f64>,
        weights_ho: Vec<Vec<f64>>,
        biases_o: Vec<f64>,
    ) -> Result<Network> {
        if input_size == 0 || hidden_size == 0 || output_size == 0 {
            return Err(MlpError::Format(format!(
                "layer sizes must be positive, got {input_size}/{hidden_size}/{output_size}"
            )));
        }
        let weights_ih = Matrix::from_rows(weights_ih, input_size, hidden_size, "weightsIh")?;
        let weights_ho = Matrix::from_rows(weights_ho, hidden_size, output_size, "weightsHo")?;
        if biases_h.len() != hidden_size {
            return Err(MlpError::shape("biasesH", biases_h.len(), hidden_size));
        }
        if biases_o.len() != output_size {
            return Err(MlpError::shape("biasesO", biases_o.len(), output_size));
        }

        Ok(Network {
            input_size,
            hidden_size,
            output_size,
            weights_ih,
            biases_h,
            weights_ho,
            biases_o,
        })
    }

    /// Runs inference. Fails with `ShapeMismatch` if `input` is not
    /// `input_size` long; every output lies in (0, 1).
    pub fn forward(&self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.input_size {
            return Err(MlpError::shape("input", input.len(), self.input_size));
        }
        let (_, output) = self.activations(input);
        Ok(output)
    }

    /// Hidden and output activations for an input already known to have the
    /// right length. The trainer needs both for backprop.
    pub(crate) fn activations(&self, input: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let hidden: Vec<f64> = (0..self.hidden_size)
            .map(|j| {
                let mut sum = self.biases_h[j];
                for (i, x) in input.iter().enumerate() {
                    sum += x * self.weights_ih.data[i][j];
                }
                sigmoid(sum)
            })
            .collect();

        let output = (0..self.output_size)
            .map(|k| {
                let mut sum = self.biases_o[k];
                for (j, h) in hidden.iter().enumerate() {
                    sum += h * self.weights_ho.data[j][k];
                }
                sigmoid(sum)
            })
            .collect();

        (hidden, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_network_has_declared_shapes() {
        let net = Network::seeded(3, 5, 2, 11);
        assert_eq!(net.weights_ih.data.len(), 3);
        assert!(net.weights_ih.data.iter().all(|row| row.len() == 5));
        assert_eq!(net.weights_ho.data.len(), 5);
        assert!(net.weights_ho.data.iter().all(|row| row.len() == 2));
        assert_eq!(net.biases_h.len(), 5);
        assert_eq!(net.biases_o.len(), 2);

        let all = net
            .weights_ih
            .data
            .iter()
            .flatten()
            .chain(net.weights_ho.data.iter().flatten())
            .chain(&net.biases_h)
            .chain(&net.biases_o);
        assert!(all.into_iter().all(|x| (-1.0..=1.0).contains(x)));
    }

    #[test]
    fn seeding_is_reproducible() {
        assert_eq!(Network::seeded(4, 3, 2, 99), Network::seeded(4, 3, 2, 99));
        assert_ne!(Network::seeded(4, 3, 2, 99), Network::seeded(4, 3, 2, 100));
    }

    #[test]
    fn forward_outputs_are_probabilities() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let net = Network::new(4, 6, 3, &mut rng);
            let input: Vec<f64> = (0..4).map(|_| rng.gen_range(0..=1) as f64).collect();
            let out = net.forward(&input).unwrap();
            assert_eq!(out.len(), 3);
            assert!(out.iter().all(|&o| o > 0.0 && o < 1.0));
        }
    }

    #[test]
    fn forward_rejects_wrong_input_length() {
        let net = Network::seeded(2, 2, 1, 0);
        let err = net.forward(&[1.0, 0.0, 1.0]).unwrap_err();
        assert!(matches!(err, MlpError::ShapeMismatch { got: 3, expected: 2, .. }));
    }

    #[test]
    fn forward_matches_hand_computation() {
        let net = Network::from_parts(
            2,
            1,
            1,
            vec![vec![1.0], vec![-1.0]],
            vec![0.5],
            vec![vec![2.0]],
            vec![-1.0],
        )
        .unwrap();
        let h = sigmoid(0.5 + 1.0 * 1.0 + 0.0 * -1.0);
        let o = sigmoid(-1.0 + h * 2.0);
        assert_eq!(net.forward(&[1.0, 0.0]).unwrap(), vec![o]);
    }

    #[test]
    fn from_parts_validates_biases() {
        let err = Network::from_parts(
            1,
            2,
            1,
            vec![vec![0.0, 0.0]],
            vec![0.0],
            vec![vec![0.0], vec![0.0]],
            vec![0.0],
        )
        .unwrap_err();
        assert!(matches!(err, MlpError::ShapeMismatch { what: "biasesH", .. }));
    }
}
