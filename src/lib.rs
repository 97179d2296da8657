//! An LSTM unit whose gates are computed by small feed-forward networks, trained with
//! truncated backpropagation through time and a momentum/weight-decay update.
//!
//! Every cell owns one sub-network per gate (forget, input, output and candidate). Each
//! sub-network maps `[input, previous_output]` to a vector of the same width, which is
//! summed into the gate's pre-activation. States of the last `T + 1` time steps are kept in
//! a ring buffer so `learn` can walk back over the truncation window.
//!
//! # Example
//! ```rust
//! use rustylstm::prelude::*;
//! use ndarray::{Array2, array};
//!
//! let config = NetworkConfig::new(3, 3, 3, 0.1, 0.5, 1e-5)
//!     .unwrap()
//!     .with_random_seed(42);
//! let mut network = Network::new(config).unwrap();
//!
//! let sequence = [array![1.0, 0.0, 0.0], array![0.0, 1.0, 0.0], array![0.0, 0.0, 1.0]];
//! for input in &sequence {
//!     network.process(input.view()).unwrap();
//! }
//!
//! let mut desired = Array2::zeros((network.available_steps_back() + 1, 3));
//! desired.row_mut(0).assign(&sequence[1]);
//! desired.row_mut(1).assign(&sequence[2]);
//! desired.row_mut(2).assign(&sequence[0]);
//! let loss = network.learn(desired.view()).unwrap();
//! assert!(loss.is_finite());
//! ```

/// Error types that can occur while configuring, running or training a network
pub mod error;

pub use error::ModelError;

/// A macro that generates a getter method for any field.
///
/// This macro creates a public getter method that returns the value of the specified
/// field. The generated method includes documentation describing the field being accessed.
///
/// # Parameters
///
/// - `$method_name` - The name of the getter method (e.g., get_input_width)
/// - `$field_name` - The name of the field to access (e.g., input_width)
/// - `$return_type` - The return type of the getter method
macro_rules! get_field {
    ($method_name:ident, $field_name:ident, $return_type:ty) => {
        #[doc = concat!("Gets the `", stringify!($field_name), "` field.\n\n")]
        #[doc = "# Returns\n\n"]
        #[doc = concat!("* `", stringify!($return_type), "` - The value of the `", stringify!($field_name), "` field")]
        pub fn $method_name(&self) -> $return_type {
            self.$field_name
        }
    };
}

/// Module `math` contains the scalar functions the network is built from.
///
/// # Functions
/// - `sigmoid` - Logistic function used by the forget, input and output gates
/// - `sigmoid_derivative_from_output` / `tanh_derivative_from_output` - Local derivatives
///   evaluated from cached activations
/// - `sum_of_squared_errors` - Loss reported by `learn`
/// - `argmax` - Index of the highest output, for decoding one-hot predictions
///
/// # Example
/// ```rust
/// use rustylstm::math::{argmax, sigmoid};
/// use ndarray::array;
///
/// assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
/// assert_eq!(argmax(&array![0.1, 0.7, 0.2]), Some(1));
/// ```
pub mod math;

/// The LSTM network, its gate sub-networks, state history and training.
///
/// # Core Components
/// - **Network**: owns configuration, parameters, optimizer and state history; exposes
///   `process` and `learn`
/// - **NetworkConfig / GateConfig / HiddenLayers**: construction parameters and per-gate
///   overrides
/// - **State / StateHistory**: per-step snapshots kept in a ring of `2T + 1` slots
/// - **FeedForward / DenseLayer**: tanh sub-networks computing each gate of each cell
/// - **LstmParameters / GateParameters**: parameter containers, also used for gradients
/// - **MomentumOptimizer**: classical momentum with decoupled weight decay
pub mod lstm;

/// A convenience module that re-exports the most commonly used types of this crate.
///
/// # Examples
/// ```rust
/// use rustylstm::prelude::*;
///
/// let config = NetworkConfig::new(2, 2, 1, 0.1, 0.5, 0.0).unwrap();
/// assert_eq!(config.get_truncation_window(), 1);
/// ```
pub mod prelude;
