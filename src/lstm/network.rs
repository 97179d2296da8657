use super::*;

/// Half-width of the uniform distribution initial sub-network parameters are drawn from
const INITIAL_WEIGHT_RANGE: f64 = 0.1;

/// LSTM unit whose gates are computed by per-cell feed-forward sub-networks.
///
/// The network owns the configuration, the current parameters, the momentum optimizer and
/// the bounded history of time-step states. Each call to [`Network::process`] advances one
/// time step; once a window of steps has been processed, [`Network::learn`] runs truncated
/// BPTT over it and updates the parameters the next step will use.
///
/// # Fields
///
/// - `config` - Construction parameters, immutable after construction
/// - `parameters` - Parameters the next processed state will be evaluated with
/// - `optimizer` - Momentum optimizer holding the previous deltas of every parameter
/// - `history` - Ring of the retained time-step states
///
/// # Example
/// ```rust
/// use rustylstm::lstm::*;
/// use ndarray::array;
///
/// let config = NetworkConfig::new(2, 2, 1, 0.1, 0.5, 1e-5)
///     .unwrap()
///     .with_random_seed(7);
/// let mut network = Network::new(config).unwrap();
///
/// network.process(array![1.0, 0.0].view()).unwrap();
/// let output = network.process(array![0.0, 1.0].view()).unwrap();
/// assert_eq!(output.len(), 2);
///
/// // one desired-output row per retained step, oldest first
/// let desired = array![[0.0, 1.0], [1.0, 0.0]];
/// let loss = network.learn(desired.view()).unwrap();
/// assert!(loss >= 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Network {
    pub(super) config: NetworkConfig,
    pub(super) parameters: Arc<LstmParameters>,
    pub(super) optimizer: MomentumOptimizer,
    pub(super) history: StateHistory,
}

impl Network {
    /// Creates a network with randomly initialized parameters.
    ///
    /// Uses the configured random seed, or a seed drawn from the thread generator when none
    /// is set.
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - If the configuration is invalid
    pub fn new(config: NetworkConfig) -> Result<Self, ModelError> {
        let mut rng = match config.get_random_seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::rng().next_u64()),
        };
        Self::new_with_rng(config, &mut rng)
    }

    /// Creates a network drawing its initial parameters from `rng`.
    ///
    /// Every sub-network weight and bias is drawn from `Uniform(-0.1, 0.1)`; the scalar gate
    /// biases start at zero.
    ///
    /// # Parameters
    ///
    /// - `config` - Construction parameters
    /// - `rng` - Random source, used only during this call
    pub fn new_with_rng<R: Rng + ?Sized>(
        config: NetworkConfig,
        rng: &mut R,
    ) -> Result<Self, ModelError> {
        let distribution = Uniform::new(-INITIAL_WEIGHT_RANGE, INITIAL_WEIGHT_RANGE)
            .map_err(|e| ModelError::ProcessingError(e.to_string()))?;

        let cells = config.get_cell_width();
        let network_input_width = config.get_network_input_width();
        let gates = GateKind::ALL.map(|kind| {
            let settings = config.gate_settings(kind);
            GateParameters::random(
                cells,
                network_input_width,
                &settings.hidden_layer_widths,
                &distribution,
                &mut *rng,
            )
        });
        let parameters = LstmParameters::from_gates(gates)?;

        let optimizer = MomentumOptimizer::new(&parameters, &config);
        let history = StateHistory::new(config.get_truncation_window())?;

        debug!(
            input_width = config.get_input_width(),
            output_width = config.get_output_width(),
            memory_cells = config.get_memory_cells(),
            truncation_window = config.get_truncation_window(),
            parameter_count = parameters.parameter_count(),
            "lstm network constructed"
        );

        Ok(Self {
            config,
            parameters: Arc::new(parameters),
            optimizer,
            history,
        })
    }

    /// Advances one time step.
    ///
    /// Pushes a new state evaluated with the current parameters over `input` and the previous
    /// state's output and cell state.
    ///
    /// # Parameters
    ///
    /// - `input` - Input vector of length `input_width`
    ///
    /// # Returns
    ///
    /// * `Array1<f64>` - The output of every cell: `output_width` nominal outputs followed by
    ///   the memory cells
    ///
    /// # Errors
    ///
    /// - `ModelError::DimensionMismatch` - If `input` has the wrong length; nothing is pushed
    pub fn process(&mut self, input: ArrayView1<f64>) -> Result<Array1<f64>, ModelError> {
        validate_length("input", self.config.get_input_width(), input.len())?;

        let previous = self.history.current().ok();
        let state = State::forward(Arc::clone(&self.parameters), input.to_owned(), previous);
        let output = state.output().clone();
        self.history.push(state);

        Ok(output)
    }

    /// Edits the parameters in place.
    ///
    /// The change is visible to the next processed state and replaces the current state's
    /// parameter snapshot. Cached values of already processed states are not recomputed.
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - If `update` changed the shape of the parameters;
    ///   the previous parameters are restored
    pub fn update_parameters<F>(&mut self, update: F) -> Result<(), ModelError>
    where
        F: FnOnce(&mut LstmParameters),
    {
        let backup = Arc::clone(&self.parameters);
        update(Arc::make_mut(&mut self.parameters));

        if !same_shape(&self.parameters, &backup) {
            self.parameters = backup;
            return Err(ModelError::InputValidationError(
                "parameter update must not change any layer shape".to_string(),
            ));
        }

        self.sync_current_state();
        Ok(())
    }

    /// Points the current state at the network's parameters
    pub(super) fn sync_current_state(&mut self) {
        let parameters = Arc::clone(&self.parameters);
        if let Ok(current) = self.history.current_mut() {
            current.set_shared_parameters(parameters);
        }
    }

    /// The most recent state
    ///
    /// # Errors
    ///
    /// - `ModelError::EmptyHistory` - If nothing has been processed
    pub fn current_state(&self) -> Result<&State, ModelError> {
        self.history.current()
    }

    /// The state `steps_back` steps before the current one
    ///
    /// # Errors
    ///
    /// - `ModelError::EmptyHistory` - If nothing has been processed
    /// - `ModelError::StepOutOfWindow` - If `steps_back > available_steps_back()`
    pub fn state(&self, steps_back: usize) -> Result<&State, ModelError> {
        self.history.get(steps_back)
    }

    /// How many steps back the next `learn` walks; `learn` expects one more desired row
    pub fn available_steps_back(&self) -> usize {
        self.history.available_steps_back()
    }

    pub fn has_state(&self, steps_back: usize) -> bool {
        self.history.has(steps_back)
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Parameters the next processed state will be evaluated with
    pub fn parameters(&self) -> &LstmParameters {
        &self.parameters
    }

    /// Optimizer state, including the deltas of the last update
    pub fn optimizer(&self) -> &MomentumOptimizer {
        &self.optimizer
    }

    /// Total number of trainable values
    pub fn parameter_count(&self) -> usize {
        self.parameters.parameter_count()
    }

    /// Drops every state. Parameters and momentum deltas are kept.
    pub fn reset(&mut self) {
        self.history.clear();
    }
}
