use super::*;

/// One fully connected tanh layer of a gate sub-network.
///
/// # Fields
///
/// - `weights` - Weight matrix with shape (neurons_in_layer, neurons_in_previous_layer)
/// - `biases` - Bias vector with shape (neurons_in_layer,)
#[derive(Debug, Clone, PartialEq)]
pub struct DenseLayer {
    pub weights: Array2<f64>,
    pub biases: Array1<f64>,
}

impl DenseLayer {
    /// Creates a layer with all weights and biases set to zero
    pub fn zeros(neurons: usize, previous_neurons: usize) -> Self {
        Self {
            weights: Array2::zeros((neurons, previous_neurons)),
            biases: Array1::zeros(neurons),
        }
    }

    /// Creates a layer whose weights and biases are drawn from `distribution`
    pub fn random<R, D>(
        neurons: usize,
        previous_neurons: usize,
        distribution: &D,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + ?Sized,
        D: Distribution<f64>,
    {
        let biases = Array1::from_shape_simple_fn(neurons, || distribution.sample(&mut *rng));
        let weights = Array2::from_shape_simple_fn((neurons, previous_neurons), || {
            distribution.sample(&mut *rng)
        });
        Self { weights, biases }
    }

    /// Number of neurons in this layer
    pub fn neurons(&self) -> usize {
        self.biases.len()
    }

    /// Number of neurons in the layer below (or the width of the network input)
    pub fn previous_neurons(&self) -> usize {
        self.weights.ncols()
    }
}

/// Multilayer feed-forward network with tanh at every layer and no skip connections.
///
/// Each LSTM cell owns one of these per gate. Layer 0 consumes the concatenation
/// `[input, previous_output]`; the topmost layer is as wide as that concatenation.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedForward {
    layers: Vec<DenseLayer>,
}

impl FeedForward {
    /// Builds a randomly initialized network.
    ///
    /// # Parameters
    ///
    /// - `input_width` - Width of the network input (and of the topmost layer)
    /// - `hidden_layer_widths` - Widths of the hidden layers, bottom to top (may be empty)
    /// - `distribution` - Distribution every weight and bias is drawn from
    /// - `rng` - Random source
    pub fn random<R, D>(
        input_width: usize,
        hidden_layer_widths: &[usize],
        distribution: &D,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + ?Sized,
        D: Distribution<f64>,
    {
        let mut layers = Vec::with_capacity(hidden_layer_widths.len() + 1);
        let mut previous = input_width;
        for &width in hidden_layer_widths.iter().chain(std::iter::once(&input_width)) {
            layers.push(DenseLayer::random(width, previous, distribution, &mut *rng));
            previous = width;
        }
        Self { layers }
    }

    /// Builds a network from explicit layers.
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - If `layers` is empty, adjacent layer shapes do not
    ///   chain, or the topmost layer is not as wide as the network input
    pub fn from_layers(layers: Vec<DenseLayer>) -> Result<Self, ModelError> {
        let first = layers.first().ok_or_else(|| {
            ModelError::InputValidationError("a sub-network needs at least one layer".to_string())
        })?;
        let input_width = first.previous_neurons();
        let mut previous = input_width;
        for (index, layer) in layers.iter().enumerate() {
            if layer.previous_neurons() != previous || layer.weights.nrows() != layer.neurons() {
                return Err(ModelError::InputValidationError(format!(
                    "layer {} has weights {:?} and {} biases, expected {} inputs",
                    index,
                    layer.weights.dim(),
                    layer.neurons(),
                    previous
                )));
            }
            previous = layer.neurons();
        }
        if previous != input_width {
            return Err(ModelError::InputValidationError(format!(
                "topmost layer has {} neurons, expected {} (the input width)",
                previous, input_width
            )));
        }
        Ok(Self { layers })
    }

    /// Returns a network with the same shape and every parameter set to zero
    pub fn zeros_like(&self) -> Self {
        Self {
            layers: self
                .layers
                .iter()
                .map(|layer| DenseLayer::zeros(layer.neurons(), layer.previous_neurons()))
                .collect(),
        }
    }

    pub fn layers(&self) -> &[DenseLayer] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [DenseLayer] {
        &mut self.layers
    }

    /// Width of the network input, which is also the width of the topmost layer
    pub fn input_width(&self) -> usize {
        self.layers
            .first()
            .map(DenseLayer::previous_neurons)
            .unwrap_or(0)
    }

    /// Widths of all hidden layers, bottom to top
    pub fn hidden_layer_widths(&self) -> Vec<usize> {
        let hidden = self.layers.len().saturating_sub(1);
        self.layers[..hidden].iter().map(DenseLayer::neurons).collect()
    }

    /// Total number of weights and biases
    pub fn parameter_count(&self) -> usize {
        self.layers
            .iter()
            .map(|layer| layer.weights.len() + layer.biases.len())
            .sum()
    }

    /// Evaluates the network and returns the tanh activations of every layer, bottom to top.
    ///
    /// The last element is the network output. The caller keeps the whole vector so the
    /// backward pass can reuse each layer's activations.
    pub fn forward(&self, input: ArrayView1<f64>) -> Vec<Array1<f64>> {
        let mut activations: Vec<Array1<f64>> = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            let mut values = match activations.last() {
                Some(previous) => layer.weights.dot(previous),
                None => layer.weights.dot(&input),
            } + &layer.biases;
            Activation::Tanh.apply_inplace(&mut values);
            activations.push(values);
        }
        activations
    }

    /// Backpropagates an error through the network.
    ///
    /// # Parameters
    ///
    /// - `input` - The input the matching [`FeedForward::forward`] call received
    /// - `activations` - The activations that call returned
    /// - `output_gradient` - dLoss/d(topmost activation), one entry per output neuron
    /// - `gradient` - Accumulator with the same shape as `self`; weight and bias gradients
    ///   of this pass are added to it
    ///
    /// # Returns
    ///
    /// * `Array1<f64>` - dLoss/d(input)
    pub fn backward(
        &self,
        input: ArrayView1<f64>,
        activations: &[Array1<f64>],
        output_gradient: Array1<f64>,
        gradient: &mut FeedForward,
    ) -> Array1<f64> {
        let mut upstream = output_gradient;
        for (index, layer) in self.layers.iter().enumerate().rev() {
            // error term of this layer: upstream * tanh'(activation)
            let delta = upstream * &Activation::Tanh.derivative_from_outputs(&activations[index]);
            let below = if index == 0 {
                input.reborrow()
            } else {
                activations[index - 1].view()
            };

            let accumulator = &mut gradient.layers[index];
            let outer = delta
                .view()
                .insert_axis(Axis(1))
                .dot(&below.insert_axis(Axis(0)));
            accumulator.weights += &outer;
            accumulator.biases += &delta;

            upstream = layer.weights.t().dot(&delta);
        }
        upstream
    }
}
