use super::*;

/// Learning rate, momentum and weight decay used by the momentum optimizer.
///
/// # Fields
///
/// - `learning_rate` - Step size applied to the raw gradient
/// - `momentum` - Fraction of the previous delta carried into the next one, in `[0, 1)`
/// - `weight_decay` - Fraction of the current value subtracted on every update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LearningHyperParameters {
    pub learning_rate: f64,
    pub momentum: f64,
    pub weight_decay: f64,
}

impl LearningHyperParameters {
    /// Creates a validated set of hyperparameters.
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - If the learning rate is not positive, momentum is
    ///   outside `[0, 1)`, weight decay is negative, or any value is not finite
    pub fn new(learning_rate: f64, momentum: f64, weight_decay: f64) -> Result<Self, ModelError> {
        validate_learning_rate(learning_rate)?;
        validate_momentum(momentum)?;
        validate_weight_decay(weight_decay)?;
        Ok(Self {
            learning_rate,
            momentum,
            weight_decay,
        })
    }
}

/// Shape of the hidden part of a gate sub-network.
///
/// The bottommost layer input and the topmost layer are always `input_width + cell_width`
/// wide; only the layers in between are described here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HiddenLayers {
    /// No hidden layers: the sub-network is a single tanh layer
    #[default]
    None,
    /// `n` hidden layers, each `input_width + cell_width` neurons wide
    Count(usize),
    /// Hidden layers with explicit widths, bottom to top
    Widths(Vec<usize>),
}

impl HiddenLayers {
    /// Expands the description into concrete widths
    pub fn resolve(&self, default_width: usize) -> Vec<usize> {
        match self {
            HiddenLayers::None => Vec::new(),
            HiddenLayers::Count(count) => vec![default_width; *count],
            HiddenLayers::Widths(widths) => widths.clone(),
        }
    }
}

/// Per-gate configuration: sub-network shape and optional learning overrides.
///
/// Unset overrides fall back to the network's sub-network hyperparameters, then to the
/// global ones.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GateConfig {
    hidden_layers: HiddenLayers,
    learning_rate: Option<f64>,
    momentum: Option<f64>,
    weight_decay: Option<f64>,
}

impl GateConfig {
    /// Creates a gate configuration with no hidden layers and no overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hidden-layer shape of this gate's sub-networks.
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - If an explicit width is 0
    pub fn with_hidden_layers(mut self, hidden_layers: HiddenLayers) -> Result<Self, ModelError> {
        if let HiddenLayers::Widths(widths) = &hidden_layers {
            validate_hidden_layer_widths(widths)?;
        }
        self.hidden_layers = hidden_layers;
        Ok(self)
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Result<Self, ModelError> {
        validate_learning_rate(learning_rate)?;
        self.learning_rate = Some(learning_rate);
        Ok(self)
    }

    pub fn with_momentum(mut self, momentum: f64) -> Result<Self, ModelError> {
        validate_momentum(momentum)?;
        self.momentum = Some(momentum);
        Ok(self)
    }

    pub fn with_weight_decay(mut self, weight_decay: f64) -> Result<Self, ModelError> {
        validate_weight_decay(weight_decay)?;
        self.weight_decay = Some(weight_decay);
        Ok(self)
    }

    pub fn hidden_layers(&self) -> &HiddenLayers {
        &self.hidden_layers
    }

    fn resolve_hyper_parameters(
        &self,
        fallback: LearningHyperParameters,
    ) -> LearningHyperParameters {
        LearningHyperParameters {
            learning_rate: self.learning_rate.unwrap_or(fallback.learning_rate),
            momentum: self.momentum.unwrap_or(fallback.momentum),
            weight_decay: self.weight_decay.unwrap_or(fallback.weight_decay),
        }
    }
}

/// Fully resolved settings of one gate, as used by the network.
///
/// # Fields
///
/// - `hidden_layer_widths` - Concrete hidden layer widths, bottom to top
/// - `hyper_parameters` - Hyperparameters for this gate's sub-network weights and biases
#[derive(Debug, Clone, PartialEq)]
pub struct GateSettings {
    pub hidden_layer_widths: Vec<usize>,
    pub hyper_parameters: LearningHyperParameters,
}

/// Construction parameters of a [`Network`](super::Network).
///
/// Immutable once the network is built.
///
/// # Example
/// ```rust
/// use rustylstm::lstm::*;
///
/// let config = NetworkConfig::new(3, 3, 3, 0.1, 0.5, 1e-5)
///     .unwrap()
///     .with_gate(
///         GateKind::Candidate,
///         GateConfig::new()
///             .with_hidden_layers(HiddenLayers::Widths(vec![8]))
///             .unwrap(),
///     )
///     .with_random_seed(42);
///
/// assert_eq!(config.get_cell_width(), 3);
/// assert_eq!(config.gate_settings(GateKind::Candidate).hidden_layer_widths, vec![8]);
/// assert!(config.gate_settings(GateKind::Forget).hidden_layer_widths.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    input_width: usize,
    output_width: usize,
    memory_cells: usize,
    truncation_window: usize,
    hyper_parameters: LearningHyperParameters,
    sub_network_hyper_parameters: Option<LearningHyperParameters>,
    gates: [GateConfig; 4],
    random_seed: Option<u64>,
}

impl NetworkConfig {
    /// Creates a configuration with no hidden layers in any gate.
    ///
    /// # Parameters
    ///
    /// - `input_width` - Length of every input vector
    /// - `output_width` - Number of outputs that receive an error signal (also the cell count
    ///   unless memory cells are added)
    /// - `truncation_window` - Number of steps BPTT walks back from the current step
    /// - `learning_rate` - Global learning rate
    /// - `momentum` - Global momentum, in `[0, 1)`
    /// - `weight_decay` - Global weight decay
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - If a width or the window is 0, or a
    ///   hyperparameter is out of range
    pub fn new(
        input_width: usize,
        output_width: usize,
        truncation_window: usize,
        learning_rate: f64,
        momentum: f64,
        weight_decay: f64,
    ) -> Result<Self, ModelError> {
        validate_dimension_greater_than_zero(input_width, "input_width")?;
        validate_dimension_greater_than_zero(output_width, "output_width")?;
        validate_dimension_greater_than_zero(truncation_window, "truncation_window")?;
        let hyper_parameters = LearningHyperParameters::new(learning_rate, momentum, weight_decay)?;

        Ok(Self {
            input_width,
            output_width,
            memory_cells: 0,
            truncation_window,
            hyper_parameters,
            sub_network_hyper_parameters: None,
            gates: Default::default(),
            random_seed: None,
        })
    }

    /// Sets hyperparameters shared by all four gate sub-networks.
    ///
    /// Gate-level overrides still take precedence.
    pub fn with_sub_network_hyper_parameters(
        mut self,
        learning_rate: f64,
        momentum: f64,
        weight_decay: f64,
    ) -> Result<Self, ModelError> {
        self.sub_network_hyper_parameters = Some(LearningHyperParameters::new(
            learning_rate,
            momentum,
            weight_decay,
        )?);
        Ok(self)
    }

    pub fn with_gate(mut self, kind: GateKind, gate: GateConfig) -> Self {
        self.gates[kind.index()] = gate;
        self
    }

    /// Gives every gate the same hidden-layer shape, keeping their learning overrides.
    pub fn with_hidden_layers(mut self, hidden_layers: HiddenLayers) -> Result<Self, ModelError> {
        for gate in self.gates.iter_mut() {
            *gate = std::mem::take(gate).with_hidden_layers(hidden_layers.clone())?;
        }
        Ok(self)
    }

    /// Appends `memory_cells` cells after the nominal outputs.
    ///
    /// They take part in the recurrence and appear in the vector returned by
    /// [`Network::process`](super::Network::process), but never receive a direct error signal.
    pub fn with_memory_cells(mut self, memory_cells: usize) -> Self {
        self.memory_cells = memory_cells;
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    get_field!(get_input_width, input_width, usize);
    get_field!(get_output_width, output_width, usize);
    get_field!(get_memory_cells, memory_cells, usize);
    get_field!(get_truncation_window, truncation_window, usize);
    get_field!(get_hyper_parameters, hyper_parameters, LearningHyperParameters);
    get_field!(get_random_seed, random_seed, Option<u64>);

    /// Number of LSTM cells: nominal outputs plus memory cells
    pub fn get_cell_width(&self) -> usize {
        self.output_width + self.memory_cells
    }

    /// Width of `[input, previous_output]`, the input and topmost width of every sub-network
    pub fn get_network_input_width(&self) -> usize {
        self.input_width + self.get_cell_width()
    }

    pub fn gate_config(&self, kind: GateKind) -> &GateConfig {
        &self.gates[kind.index()]
    }

    /// Resolves hidden widths and hyperparameters of one gate
    pub fn gate_settings(&self, kind: GateKind) -> GateSettings {
        let gate = &self.gates[kind.index()];
        let fallback = self
            .sub_network_hyper_parameters
            .unwrap_or(self.hyper_parameters);
        GateSettings {
            hidden_layer_widths: gate
                .hidden_layers
                .resolve(self.get_network_input_width()),
            hyper_parameters: gate.resolve_hyper_parameters(fallback),
        }
    }
}
