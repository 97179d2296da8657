use super::*;

/// Values a backward step reads from the temporally adjacent states.
///
/// # Fields
///
/// - `later_output_gradient` - dLoss/d(this step's output) produced by the later step,
///   `None` for the current step
/// - `later_cell_state_gradient` - dLoss/d(this step's cell state) produced by the later step,
///   `None` for the current step
/// - `previous_cell_state` - Cell state of the step one deeper, `None` at the window boundary
#[derive(Debug, Clone, Default)]
pub(super) struct Neighbours {
    pub later_output_gradient: Option<Array1<f64>>,
    pub later_cell_state_gradient: Option<Array1<f64>>,
    pub previous_cell_state: Option<Array1<f64>>,
}

/// Complete numeric snapshot of one time step.
///
/// A state is created by [`Network::process`](super::Network::process) and keeps the
/// parameters that were current at that moment, the raw input, every gate value, the cell
/// memory, the output and each sub-network's cached layer activations. The backward pass
/// writes the three gradient vectors once per `learn` call.
///
/// # Fields
///
/// - `parameters` - Snapshot of the parameters this step was evaluated with
/// - `input` - Raw input vector
/// - `has_previous` - Whether a previous state existed when this step was evaluated
/// - `sub_network_input` - `[input, previous_output]`, zero-filled when there was no previous state
/// - `activations` - Per gate, per cell, per layer tanh activations of the sub-networks
/// - `gate_values` - Per gate activated values, one entry per cell
/// - `cell_state` - Cell memory after this step
/// - `output` - Output after this step (nominal outputs followed by memory cells)
/// - `cell_state_gradient` - dLoss/d(cell state) multiplied by the forget gate, handed to the
///   step one deeper
/// - `output_gradient` - dLoss/d(previous output), handed to the step one deeper
/// - `input_gradient` - dLoss/d(input)
#[derive(Debug, Clone)]
pub struct State {
    parameters: Arc<LstmParameters>,
    input: Array1<f64>,
    has_previous: bool,
    sub_network_input: Array1<f64>,
    activations: [Vec<Vec<Array1<f64>>>; 4],
    gate_values: [Array1<f64>; 4],
    cell_state: Array1<f64>,
    output: Array1<f64>,
    cell_state_gradient: Array1<f64>,
    output_gradient: Array1<f64>,
    input_gradient: Array1<f64>,
}

impl State {
    /// Runs the forward pass of one time step.
    ///
    /// Every gate sub-network is evaluated over `[input, previous_output]`; the topmost layer
    /// is reduced to a scalar by summing its input part (and its previous-output part when a
    /// previous state exists), the gate's scalar bias is added and the gate activation applied.
    /// Then `cell_state = f * previous_cell_state + i * g` and `output = o * cell_state`.
    ///
    /// # Parameters
    ///
    /// - `parameters` - Parameters to evaluate with; kept as this state's snapshot
    /// - `input` - Input vector, already checked against the configured width
    /// - `previous` - The state one step earlier, if any
    pub(super) fn forward(
        parameters: Arc<LstmParameters>,
        input: Array1<f64>,
        previous: Option<&State>,
    ) -> Self {
        let cells = parameters.cells();
        let input_width = input.len();
        let has_previous = previous.is_some();

        let mut sub_network_input = Array1::zeros(input_width + cells);
        sub_network_input.slice_mut(s![..input_width]).assign(&input);
        if let Some(previous) = previous {
            sub_network_input
                .slice_mut(s![input_width..])
                .assign(&previous.output);
        }

        let mut activations: [Vec<Vec<Array1<f64>>>; 4] = Default::default();
        let mut gate_values: [Array1<f64>; 4] = std::array::from_fn(|_| Array1::zeros(cells));

        for (kind, gate) in parameters.iter() {
            let values = &mut gate_values[kind.index()];
            for (cell, network) in gate.networks.iter().enumerate() {
                let layers = network.forward(sub_network_input.view());
                let reduced = layers
                    .last()
                    .map(|top| {
                        let mut sum = top.slice(s![..input_width]).sum();
                        if has_previous {
                            sum += top.slice(s![input_width..]).sum();
                        }
                        sum
                    })
                    .unwrap_or(0.0);
                values[cell] = kind.activation().apply(reduced + gate.bias[cell]);
                activations[kind.index()].push(layers);
            }
        }

        let [forget, input_gate, output_gate, candidate] = &gate_values;
        let mut cell_state = input_gate * candidate;
        if let Some(previous) = previous {
            cell_state += &(forget * &previous.cell_state);
        }
        let output = output_gate * &cell_state;

        Self {
            parameters,
            input,
            has_previous,
            sub_network_input,
            activations,
            gate_values,
            cell_state,
            output,
            cell_state_gradient: Array1::zeros(cells),
            output_gradient: Array1::zeros(cells),
            input_gradient: Array1::zeros(input_width),
        }
    }

    /// Backpropagates one time step and adds its parameter gradients to `gradients`.
    ///
    /// Only the first `desired.len()` outputs receive a direct error signal. Memory cells
    /// beyond that still pass gradient through the recurrence.
    ///
    /// # Parameters
    ///
    /// - `desired` - Desired nominal outputs for this step
    /// - `neighbours` - Values of the temporally adjacent states
    /// - `gradients` - Accumulator shaped like the parameters
    ///
    /// # Returns
    ///
    /// * `f64` - Squared error of this step's nominal outputs
    pub(super) fn backward(
        &mut self,
        desired: ArrayView1<f64>,
        neighbours: Neighbours,
        gradients: &mut LstmParameters,
    ) -> f64 {
        let cells = self.cell_state.len();
        let input_width = self.input.len();
        let output_width = desired.len();
        let loss = sum_of_squared_errors(&self.output, &desired);

        // diff_h: direct error on the nominal outputs plus what the later step sent back
        let mut output_error: Array1<f64> = Array1::zeros(cells);
        output_error
            .slice_mut(s![..output_width])
            .assign(&((&self.output.slice(s![..output_width]) - &desired) * 2.0));
        if let Some(later) = &neighbours.later_output_gradient {
            output_error += later;
        }

        let [forget, input_gate, output_gate, candidate] = &self.gate_values;
        let mut cell_error = output_gate * &output_error;
        if let Some(later) = &neighbours.later_cell_state_gradient {
            cell_error += later;
        }

        let mut gate_errors: [Array1<f64>; 4] = std::array::from_fn(|_| Array1::zeros(cells));
        gate_errors[GateKind::Forget.index()] = match &neighbours.previous_cell_state {
            Some(previous) => previous * &cell_error,
            None => Array1::zeros(cells),
        };
        gate_errors[GateKind::Input.index()] = candidate * &cell_error;
        gate_errors[GateKind::Output.index()] = &self.cell_state * &output_error;
        gate_errors[GateKind::Candidate.index()] = input_gate * &cell_error;

        let network_input_width = self.sub_network_input.len();
        let mut network_input_gradient: Array1<f64> = Array1::zeros(network_input_width);

        for kind in GateKind::ALL {
            let pre_activation = &gate_errors[kind.index()]
                * &kind
                    .activation()
                    .derivative_from_outputs(&self.gate_values[kind.index()]);
            let gate_gradient = &mut gradients[kind];
            gate_gradient.bias += &pre_activation;

            for (cell, network) in self.parameters[kind].networks.iter().enumerate() {
                // the reduction sums the top layer, so every summed slot sees the same error
                let mut top_gradient = Array1::zeros(network_input_width);
                top_gradient
                    .slice_mut(s![..input_width])
                    .fill(pre_activation[cell]);
                if self.has_previous {
                    top_gradient
                        .slice_mut(s![input_width..])
                        .fill(pre_activation[cell]);
                }
                network_input_gradient += &network.backward(
                    self.sub_network_input.view(),
                    &self.activations[kind.index()][cell],
                    top_gradient,
                    &mut gate_gradient.networks[cell],
                );
            }
        }

        self.cell_state_gradient = &cell_error * forget;
        self.input_gradient = network_input_gradient.slice(s![..input_width]).to_owned();
        self.output_gradient = network_input_gradient.slice(s![input_width..]).to_owned();

        loss
    }

    /// Parameters this step was evaluated with
    pub fn parameters(&self) -> &LstmParameters {
        &self.parameters
    }

    pub(super) fn set_shared_parameters(&mut self, parameters: Arc<LstmParameters>) {
        self.parameters = parameters;
    }

    pub fn input(&self) -> &Array1<f64> {
        &self.input
    }

    /// Output vector: nominal outputs followed by memory cells
    pub fn output(&self) -> &Array1<f64> {
        &self.output
    }

    pub fn cell_state(&self) -> &Array1<f64> {
        &self.cell_state
    }

    /// Activated values of one gate, one entry per cell
    pub fn gate_value(&self, kind: GateKind) -> &Array1<f64> {
        &self.gate_values[kind.index()]
    }

    /// Whether a previous state fed this step's recurrent input
    pub fn has_previous(&self) -> bool {
        self.has_previous
    }

    /// The `[input, previous_output]` vector every sub-network of this step consumed
    pub fn sub_network_input(&self) -> &Array1<f64> {
        &self.sub_network_input
    }

    /// Cached tanh activations of one sub-network, bottom to top.
    ///
    /// Returns `None` if `cell` is out of range.
    pub fn layer_activations(&self, kind: GateKind, cell: usize) -> Option<&[Array1<f64>]> {
        self.activations[kind.index()]
            .get(cell)
            .map(|layers| layers.as_slice())
    }

    /// dLoss/d(cell state) multiplied by the forget gate, from the last backward pass
    pub fn cell_state_gradient(&self) -> &Array1<f64> {
        &self.cell_state_gradient
    }

    /// dLoss/d(previous output), from the last backward pass
    pub fn output_gradient(&self) -> &Array1<f64> {
        &self.output_gradient
    }

    /// dLoss/d(input), from the last backward pass
    pub fn input_gradient(&self) -> &Array1<f64> {
        &self.input_gradient
    }
}
