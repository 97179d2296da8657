/// Error types that can occur while configuring, running or training a network
///
/// # Variants
///
/// - `InputValidationError` - A configuration value does not meet the expected range or shape
/// - `DimensionMismatch` - A vector or matrix handed to the network has the wrong length
/// - `EmptyHistory` - The operation needs at least one processed time step, but none exists
/// - `StepOutOfWindow` - A state further back than the retained truncation window was requested
/// - `ProcessingError` - Internal buffers are inconsistent with the configured shapes
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    InputValidationError(String),
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    EmptyHistory,
    StepOutOfWindow {
        steps_back: usize,
        available: usize,
    },
    ProcessingError(String),
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InputValidationError(msg) => write!(f, "Input validation error: {}", msg),
            ModelError::DimensionMismatch {
                what,
                expected,
                actual,
            } => write!(
                f,
                "Dimension mismatch for {}: expected {}, got {}",
                what, expected, actual
            ),
            ModelError::EmptyHistory => {
                write!(
                    f,
                    "No time step has been processed yet. Call `process` before accessing states or calling `learn`."
                )
            }
            ModelError::StepOutOfWindow {
                steps_back,
                available,
            } => write!(
                f,
                "State {} steps back is outside the retained window (at most {} steps back available)",
                steps_back, available
            ),
            ModelError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
        }
    }
}

/// Implements the standard error trait for ModelError
impl std::error::Error for ModelError {}
