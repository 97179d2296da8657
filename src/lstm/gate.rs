use super::*;

/// The four gates of an LSTM cell.
///
/// Forget, input and output gates squash their pre-activation with a sigmoid; the
/// candidate gate uses tanh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    Forget,
    Input,
    Output,
    Candidate,
}

impl GateKind {
    /// All gates, in storage order
    pub const ALL: [GateKind; 4] = [
        GateKind::Forget,
        GateKind::Input,
        GateKind::Output,
        GateKind::Candidate,
    ];

    /// Position of this gate in per-gate arrays
    #[inline]
    pub fn index(self) -> usize {
        match self {
            GateKind::Forget => 0,
            GateKind::Input => 1,
            GateKind::Output => 2,
            GateKind::Candidate => 3,
        }
    }

    /// Activation applied to the gate's pre-activation sum
    #[inline]
    pub fn activation(self) -> Activation {
        match self {
            GateKind::Candidate => Activation::Tanh,
            _ => Activation::Sigmoid,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GateKind::Forget => "forget",
            GateKind::Input => "input",
            GateKind::Output => "output",
            GateKind::Candidate => "candidate",
        }
    }
}

impl std::fmt::Display for GateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Trainable parameters of one gate across all cells.
///
/// # Fields
///
/// - `networks` - One feed-forward sub-network per cell
/// - `bias` - One scalar bias per cell, added after reducing the sub-network output
#[derive(Debug, Clone, PartialEq)]
pub struct GateParameters {
    pub networks: Vec<FeedForward>,
    pub bias: Array1<f64>,
}

impl GateParameters {
    /// Creates randomly initialized sub-networks and zero scalar biases for `cells` cells.
    pub fn random<R, D>(
        cells: usize,
        network_input_width: usize,
        hidden_layer_widths: &[usize],
        distribution: &D,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + ?Sized,
        D: Distribution<f64>,
    {
        let networks = (0..cells)
            .map(|_| {
                FeedForward::random(
                    network_input_width,
                    hidden_layer_widths,
                    distribution,
                    &mut *rng,
                )
            })
            .collect();
        Self {
            networks,
            bias: Array1::zeros(cells),
        }
    }

    pub fn zeros_like(&self) -> Self {
        Self {
            networks: self.networks.iter().map(FeedForward::zeros_like).collect(),
            bias: Array1::zeros(self.bias.len()),
        }
    }

    pub fn parameter_count(&self) -> usize {
        self.networks
            .iter()
            .map(FeedForward::parameter_count)
            .sum::<usize>()
            + self.bias.len()
    }
}

/// Complete parameter set of the LSTM unit: one [`GateParameters`] per gate.
///
/// Also used with the same shape for gradient sums and for the momentum optimizer's
/// previous deltas. Index it with a [`GateKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct LstmParameters {
    gates: [GateParameters; 4],
}

impl LstmParameters {
    /// Assembles a parameter set from per-gate parameters in [`GateKind::ALL`] order.
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - If the gates disagree on the number of cells or
    ///   on the sub-network input width
    pub fn from_gates(gates: [GateParameters; 4]) -> Result<Self, ModelError> {
        let cells = gates[0].bias.len();
        let input_width = gates[0]
            .networks
            .first()
            .map(FeedForward::input_width)
            .unwrap_or(0);
        for kind in GateKind::ALL {
            let gate = &gates[kind.index()];
            if gate.bias.len() != cells || gate.networks.len() != cells {
                return Err(ModelError::InputValidationError(format!(
                    "{} gate has {} networks and {} biases, expected {} cells",
                    kind,
                    gate.networks.len(),
                    gate.bias.len(),
                    cells
                )));
            }
            if let Some(network) = gate
                .networks
                .iter()
                .find(|network| network.input_width() != input_width)
            {
                return Err(ModelError::InputValidationError(format!(
                    "{} gate has a sub-network with input width {}, expected {}",
                    kind,
                    network.input_width(),
                    input_width
                )));
            }
        }
        Ok(Self { gates })
    }

    pub fn zeros_like(&self) -> Self {
        Self {
            gates: std::array::from_fn(|index| self.gates[index].zeros_like()),
        }
    }

    /// Number of cells (equal to the cell width of the network)
    pub fn cells(&self) -> usize {
        self.gates[0].bias.len()
    }

    pub fn gate(&self, kind: GateKind) -> &GateParameters {
        &self.gates[kind.index()]
    }

    pub fn gate_mut(&mut self, kind: GateKind) -> &mut GateParameters {
        &mut self.gates[kind.index()]
    }

    /// Iterates over `(kind, parameters)` pairs in [`GateKind::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (GateKind, &GateParameters)> {
        GateKind::ALL.into_iter().zip(self.gates.iter())
    }

    pub fn parameter_count(&self) -> usize {
        self.gates.iter().map(GateParameters::parameter_count).sum()
    }
}

impl std::ops::Index<GateKind> for LstmParameters {
    type Output = GateParameters;

    fn index(&self, kind: GateKind) -> &GateParameters {
        self.gate(kind)
    }
}

impl std::ops::IndexMut<GateKind> for LstmParameters {
    fn index_mut(&mut self, kind: GateKind) -> &mut GateParameters {
        self.gate_mut(kind)
    }
}
