use super::*;

/// Classical momentum with decoupled weight decay.
///
/// For every parameter:
///
/// ```text
/// delta = (1 - momentum) * (-learning_rate * gradient) + momentum * previous_delta - weight_decay * value
/// value += delta
/// previous_delta = delta
/// ```
///
/// The previous deltas live here, in the network, and survive across `learn` calls.
/// Sub-network weights and biases use their gate's resolved hyperparameters; the per-cell
/// scalar gate biases use the global ones.
///
/// # Fields
///
/// - `previous_deltas` - Last applied delta of every parameter, shaped like the parameters
/// - `gate_hyper_parameters` - Resolved hyperparameters of each gate's sub-networks
/// - `bias_hyper_parameters` - Hyperparameters of the scalar gate biases
#[derive(Debug, Clone, PartialEq)]
pub struct MomentumOptimizer {
    previous_deltas: LstmParameters,
    gate_hyper_parameters: [LearningHyperParameters; 4],
    bias_hyper_parameters: LearningHyperParameters,
}

impl MomentumOptimizer {
    /// Creates an optimizer with zero previous deltas for `parameters`
    pub fn new(parameters: &LstmParameters, config: &NetworkConfig) -> Self {
        Self {
            previous_deltas: parameters.zeros_like(),
            gate_hyper_parameters: GateKind::ALL
                .map(|kind| config.gate_settings(kind).hyper_parameters),
            bias_hyper_parameters: config.get_hyper_parameters(),
        }
    }

    /// Applies one update step to `parameters`.
    ///
    /// # Errors
    ///
    /// - `ModelError::ProcessingError` - If `gradients` or the stored deltas are not shaped
    ///   like `parameters`
    pub fn step(
        &mut self,
        parameters: &mut LstmParameters,
        gradients: &LstmParameters,
    ) -> Result<(), ModelError> {
        if !same_shape(parameters, gradients) || !same_shape(parameters, &self.previous_deltas) {
            return Err(ModelError::ProcessingError(
                "gradient shape does not match the parameter shape".to_string(),
            ));
        }

        for kind in GateKind::ALL {
            let hyper = self.gate_hyper_parameters[kind.index()];
            let gate = &mut parameters[kind];
            let gradient = &gradients[kind];
            let deltas = &mut self.previous_deltas[kind];

            for ((network, network_gradient), network_deltas) in gate
                .networks
                .iter_mut()
                .zip(&gradient.networks)
                .zip(deltas.networks.iter_mut())
            {
                for ((layer, layer_gradient), layer_deltas) in network
                    .layers_mut()
                    .iter_mut()
                    .zip(network_gradient.layers())
                    .zip(network_deltas.layers_mut().iter_mut())
                {
                    momentum_update(
                        &mut layer.weights,
                        &layer_gradient.weights,
                        &mut layer_deltas.weights,
                        hyper,
                    );
                    momentum_update(
                        &mut layer.biases,
                        &layer_gradient.biases,
                        &mut layer_deltas.biases,
                        hyper,
                    );
                }
            }

            momentum_update(
                &mut gate.bias,
                &gradient.bias,
                &mut deltas.bias,
                self.bias_hyper_parameters,
            );
        }
        Ok(())
    }

    /// Last applied deltas, shaped like the parameters
    pub fn previous_deltas(&self) -> &LstmParameters {
        &self.previous_deltas
    }

    pub fn gate_hyper_parameters(&self, kind: GateKind) -> LearningHyperParameters {
        self.gate_hyper_parameters[kind.index()]
    }

    pub fn bias_hyper_parameters(&self) -> LearningHyperParameters {
        self.bias_hyper_parameters
    }
}

/// Updates `values` in place and records the applied deltas
fn momentum_update<D: Dimension>(
    values: &mut Array<f64, D>,
    gradients: &Array<f64, D>,
    previous_deltas: &mut Array<f64, D>,
    hyper: LearningHyperParameters,
) {
    let LearningHyperParameters {
        learning_rate,
        momentum,
        weight_decay,
    } = hyper;

    Zip::from(values)
        .and(gradients)
        .and(previous_deltas)
        .for_each(|value, &gradient, previous| {
            let delta = (1.0 - momentum) * (-learning_rate * gradient) + momentum * *previous
                - weight_decay * *value;
            *value += delta;
            *previous = delta;
        });
}

pub(super) fn same_shape(left: &LstmParameters, right: &LstmParameters) -> bool {
    left.iter().zip(right.iter()).all(|((_, a), (_, b))| {
        a.bias.len() == b.bias.len()
            && a.networks.len() == b.networks.len()
            && a.networks.iter().zip(&b.networks).all(|(x, y)| {
                x.layers().len() == y.layers().len()
                    && x.layers().iter().zip(y.layers()).all(|(p, q)| {
                        p.weights.dim() == q.weights.dim() && p.biases.len() == q.biases.len()
                    })
            })
    })
}
