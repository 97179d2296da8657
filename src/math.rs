use ndarray::{ArrayBase, Data, Ix1};

/// Computes the logistic sigmoid for a scalar input.
///
/// The sigmoid maps any real number into the open interval (0, 1) with clipping
/// for extreme values to preserve numerical stability.
///
/// # Parameters
///
/// - `z` - Input value to transform
///
/// # Returns
///
/// - `f64` - Sigmoid output in the range (0, 1)
///
/// # Examples
/// ```rust
/// use rustylstm::math::sigmoid;
///
/// let value = sigmoid(0.0);
/// // sigmoid(0) = 0.5
/// assert!((value - 0.5).abs() < 1e-12);
/// ```
#[inline]
pub fn sigmoid(z: f64) -> f64 {
    const MAX_SIGMOID_INPUT: f64 = 500.0;
    const MIN_SIGMOID_INPUT: f64 = -500.0;

    if z > MAX_SIGMOID_INPUT {
        return 1.0;
    } else if z < MIN_SIGMOID_INPUT {
        return 0.0;
    }

    1.0 / (1.0 + (-z).exp())
}

/// Derivative of the sigmoid expressed through its own output `s = sigmoid(z)`.
#[inline]
pub fn sigmoid_derivative_from_output(s: f64) -> f64 {
    s * (1.0 - s)
}

/// Derivative of tanh expressed through its own output `a = tanh(z)`.
#[inline]
pub fn tanh_derivative_from_output(a: f64) -> f64 {
    1.0 - a * a
}

/// Calculates the sum of squared errors (SSE).
///
/// SSE measures the total squared difference between predicted values and actual labels.
/// Only the overlapping prefix of the two vectors is compared, which lets callers pass a
/// full cell vector against a shorter desired-output vector.
///
/// # Parameters
///
/// - `predicted` - Predicted values vector
/// - `actual` - Actual values vector
///
/// # Returns
///
/// - `f64` - Sum of squared errors computed as sum((predicted_i - actual_i)^2)
///
/// # Examples
/// ```rust
/// use rustylstm::math::sum_of_squared_errors;
/// use ndarray::array;
///
/// let predicted = array![2.0, 3.0];
/// let actual = array![1.0, 5.0];
/// assert!((sum_of_squared_errors(&predicted, &actual) - 5.0).abs() < 1e-12);
/// ```
pub fn sum_of_squared_errors<S1, S2>(
    predicted: &ArrayBase<S1, Ix1>,
    actual: &ArrayBase<S2, Ix1>,
) -> f64
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    predicted
        .iter()
        .zip(actual.iter())
        .map(|(p, a)| (p - a).powi(2))
        .sum()
}

/// Returns the index of the largest value, or `None` for an empty vector.
///
/// Ties resolve to the first maximal index. NaN values never win.
///
/// # Examples
/// ```rust
/// use rustylstm::math::argmax;
/// use ndarray::array;
///
/// assert_eq!(argmax(&array![0.1, 0.7, 0.2]), Some(1));
/// ```
pub fn argmax<S>(values: &ArrayBase<S, Ix1>) -> Option<usize>
where
    S: Data<Elem = f64>,
{
    let mut best: Option<(usize, f64)> = None;
    for (index, &value) in values.iter().enumerate() {
        match best {
            Some((_, current)) if !(value > current) => {}
            _ if value.is_nan() => {}
            _ => best = Some((index, value)),
        }
    }
    best.map(|(index, _)| index)
}
