use super::*;

/// Validates that a dimension value is greater than 0
///
/// # Parameters
///
/// - `value` - The dimension value to validate
/// - `name` - The name of the dimension for error messages
///
/// # Returns
///
/// * `Ok(())` if validation passes
/// * `Err(ModelError)` if validation fails
pub(super) fn validate_dimension_greater_than_zero(
    value: usize,
    name: &str,
) -> Result<(), ModelError> {
    if value == 0 {
        return Err(ModelError::InputValidationError(format!(
            "{} must be greater than 0",
            name
        )));
    }
    Ok(())
}

/// Validates that the learning rate is positive and finite.
///
/// # Parameters
///
/// * `learning_rate` - The learning rate value to validate
///
/// # Returns
///
/// - `Ok(())` if the learning rate is positive and finite
/// - `Err(ModelError::InputValidationError)` if the learning rate is not positive or not finite
pub(super) fn validate_learning_rate(learning_rate: f64) -> Result<(), ModelError> {
    if !(learning_rate > 0.0 && learning_rate.is_finite()) {
        return Err(ModelError::InputValidationError(format!(
            "learning_rate must be positive and finite, got {}",
            learning_rate
        )));
    }
    Ok(())
}

/// Validates that momentum is in the range [0, 1) and finite.
///
/// # Returns
///
/// - `Ok(())` if the value is in the valid range
/// - `Err(ModelError::InputValidationError)` if the value is out of range or not finite
pub(super) fn validate_momentum(momentum: f64) -> Result<(), ModelError> {
    if !((0.0..1.0).contains(&momentum) && momentum.is_finite()) {
        return Err(ModelError::InputValidationError(format!(
            "momentum must be in range [0, 1) and finite, got {}",
            momentum
        )));
    }
    Ok(())
}

/// Validates that weight decay is non-negative and finite.
pub(super) fn validate_weight_decay(weight_decay: f64) -> Result<(), ModelError> {
    if !(weight_decay >= 0.0 && weight_decay.is_finite()) {
        return Err(ModelError::InputValidationError(format!(
            "weight_decay must be non-negative and finite, got {}",
            weight_decay
        )));
    }
    Ok(())
}

/// Validates that every hidden layer has at least one neuron
pub(super) fn validate_hidden_layer_widths(widths: &[usize]) -> Result<(), ModelError> {
    if let Some(layer) = widths.iter().position(|&width| width == 0) {
        return Err(ModelError::InputValidationError(format!(
            "hidden layer {} must have at least one neuron",
            layer
        )));
    }
    Ok(())
}

/// Validates that a vector handed to the network has the configured length
///
/// # Parameters
///
/// - `what` - Name of the vector for error messages
/// - `expected` - Configured length
/// - `actual` - Length of the supplied vector
///
/// # Returns
///
/// * `Ok(())` if the lengths match
/// * `Err(ModelError::DimensionMismatch)` otherwise
pub(super) fn validate_length(
    what: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), ModelError> {
    if expected != actual {
        return Err(ModelError::DimensionMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}
