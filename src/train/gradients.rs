use crate::activation::sigmoid_derivative;
use crate::data::TrainingExample;
use crate::math::matrix::{add_scaled_vec, Matrix};
use crate::network::Network;

/// Learning-rate-scaled updates summed over every example in one batch,
/// plus that batch's summed squared error.
///
/// Computed against a read-only network so batches can run in parallel.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchGradients {
    pub total_error: f64,
    pub weights_ih: Matrix,
    pub biases_h: Vec<f64>,
    pub weights_ho: Matrix,
    pub biases_o: Vec<f64>,
}

impl BatchGradients {
    pub fn zeros(network: &Network) -> Self {
        BatchGradients {
            total_error: 0.0,
            weights_ih: Matrix::zeros(network.input_size, network.hidden_size),
            biases_h: vec![0.0; network.hidden_size],
            weights_ho: Matrix::zeros(network.hidden_size, network.output_size),
            biases_o: vec![0.0; network.output_size],
        }
    }

    /// Forward and backward pass over `batch`. Example shapes must already
    /// match the network.
    pub fn compute(network: &Network, batch: &[TrainingExample], learning_rate: f64) -> Self {
        let mut acc = BatchGradients::zeros(network);
        for example in batch {
            acc.accumulate(network, example, learning_rate);
        }
        acc
    }

    fn accumulate(&mut self, network: &Network, example: &TrainingExample, lr: f64) {
        let (hidden, output) = network.activations(&example.input);

        let output_deltas: Vec<f64> = output
            .iter()
            .zip(&example.target)
            .map(|(&o, &t)| {
                self.total_error += (t - o) * (t - o);
                (t - o) * sigmoid_derivative(o)
            })
            .collect();

        let hidden_deltas: Vec<f64> = hidden
            .iter()
            .enumerate()
            .map(|(j, &h)| {
                let back: f64 = output_deltas
                    .iter()
                    .enumerate()
                    .map(|(k, d)| d * network.weights_ho.data[j][k])
                    .sum();
                back * sigmoid_derivative(h)
            })
            .collect();

        for (k, &d) in output_deltas.iter().enumerate() {
            self.biases_o[k] += lr * d;
            for (j, &h) in hidden.iter().enumerate() {
                self.weights_ho.data[j][k] += lr * d * h;
            }
        }

        for (j, &d) in hidden_deltas.iter().enumerate() {
            self.biases_h[j] += lr * d;
            for (i, &x) in example.input.iter().enumerate() {
                self.weights_ih.data[i][j] += lr * d * x;
            }
        }
    }

    /// Adds `self / divisor` into the network's parameters.
    pub fn apply_to(&self, network: &mut Network, divisor: f64) {
        let factor = 1.0 / divisor;
        network.weights_ho.add_scaled(&self.weights_ho, factor);
        add_scaled_vec(&mut network.biases_o, &self.biases_o, factor);
        network.weights_ih.add_scaled(&self.weights_ih, factor);
        add_scaled_vec(&mut network.biases_h, &self.biases_h, factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradients_split_across_batches_sum_to_the_whole() {
        let net = Network::seeded(2, 3, 2, 8);
        let data = vec![
            TrainingExample::new(vec![0.0, 1.0], vec![1.0, 0.0]),
            TrainingExample::new(vec![1.0, 1.0], vec![0.0, 1.0]),
            TrainingExample::new(vec![1.0, 0.0], vec![1.0, 1.0]),
        ];
        let whole = BatchGradients::compute(&net, &data, 0.3);
        let a = BatchGradients::compute(&net, &data[..1], 0.3);
        let b = BatchGradients::compute(&net, &data[1..], 0.3);

        assert!((whole.total_error - (a.total_error + b.total_error)).abs() < 1e-12);
        for k in 0..2 {
            assert!((whole.biases_o[k] - (a.biases_o[k] + b.biases_o[k])).abs() < 1e-12);
        }
        for i in 0..2 {
            for j in 0..3 {
                let sum = a.weights_ih.data[i][j] + b.weights_ih.data[i][j];
                assert!((whole.weights_ih.data[i][j] - sum).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn perfect_prediction_has_no_update() {
        // saturated output: sigmoid(40) rounds to 1.0 in f64
        let net =
            Network::from_parts(1, 1, 1, vec![vec![0.0]], vec![0.0], vec![vec![0.0]], vec![40.0])
                .unwrap();
        let example = TrainingExample::new(vec![1.0], vec![1.0]);
        let grads = BatchGradients::compute(&net, &[example], 1.0);
        assert_eq!(grads.total_error, 0.0);
        assert_eq!(grads.biases_o, vec![0.0]);
    }
}
