/// Logistic sigmoid, `1 / (1 + e^-x)`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Derivative of the sigmoid expressed through its *output*:
/// given `y = sigmoid(x)`, returns `y * (1 - y)`.
pub fn sigmoid_derivative(y: f64) -> f64 {
    y * (1.0 - y)
}
