use super::*;

/// Activation function enum for the gate non-linearities and the sub-network neurons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Sigmoid,
    Tanh,
}

impl Activation {
    /// Applies the activation function to a scalar
    ///
    /// # Parameters
    ///
    /// - `z` - Pre-activation value
    ///
    /// # Returns
    ///
    /// * `f64` - The activated value
    #[inline]
    pub fn apply(self, z: f64) -> f64 {
        match self {
            Activation::Sigmoid => sigmoid(z),
            Activation::Tanh => z.tanh(),
        }
    }

    /// Derivative of the activation, given the already activated value
    ///
    /// Both supported functions have derivatives that are cheaper to evaluate from
    /// their output than from their input, which is what the backward pass keeps
    /// cached.
    ///
    /// # Parameters
    ///
    /// - `activated` - The output of [`Activation::apply`]
    ///
    /// # Returns
    ///
    /// * `f64` - `a * (1 - a)` for sigmoid, `1 - a^2` for tanh
    #[inline]
    pub fn derivative_from_output(self, activated: f64) -> f64 {
        match self {
            Activation::Sigmoid => sigmoid_derivative_from_output(activated),
            Activation::Tanh => tanh_derivative_from_output(activated),
        }
    }

    /// Applies the activation element-wise to a vector in place
    pub fn apply_inplace(self, values: &mut Array1<f64>) {
        values.mapv_inplace(|z| self.apply(z));
    }

    /// Element-wise derivative of a vector of activated values
    pub fn derivative_from_outputs(self, activated: &Array1<f64>) -> Array1<f64> {
        activated.mapv(|a| self.derivative_from_output(a))
    }
}
