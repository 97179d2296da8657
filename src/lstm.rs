/// Module that contains the gate and sub-network activation functions
pub mod activation;
/// Module that contains truncated backpropagation through time
pub mod bptt;
/// Module that contains network and per-gate configuration
pub mod config;
/// Module that contains the feed-forward sub-networks computing every gate
pub mod feed_forward;
/// Module that contains gate kinds and the parameter containers
pub mod gate;
/// Module that contains the LSTM network
pub mod network;
/// Module that contains the momentum and weight-decay optimizer
pub mod optimizer;
/// Module that contains the per-step state snapshot
pub mod state;
/// Module that contains the bounded ring of states
pub mod state_history;

mod input_validation_function;

pub use activation::*;
pub use bptt::*;
pub use config::*;
pub use feed_forward::*;
pub use gate::*;
pub use network::*;
pub use optimizer::*;
pub use state::*;
pub use state_history::*;

use crate::ModelError;
use crate::math::{
    sigmoid, sigmoid_derivative_from_output, sum_of_squared_errors, tanh_derivative_from_output,
};
use input_validation_function::*;
use ndarray::{Array, Array1, Array2, ArrayView1, ArrayView2, Axis, Dimension, Zip, s};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_distr::{Distribution, Uniform};
use std::sync::Arc;
use tracing::{debug, trace};
