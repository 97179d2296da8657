use super::*;

/// Parameter gradients summed over a truncation window.
///
/// # Fields
///
/// - `parameters` - dLoss/d(parameter) for every parameter, shaped like [`LstmParameters`]
/// - `loss` - Sum of squared errors of the nominal outputs over the window
#[derive(Debug, Clone, PartialEq)]
pub struct WindowGradients {
    pub parameters: LstmParameters,
    pub loss: f64,
}

impl Network {
    /// Runs truncated BPTT over the retained window without updating any parameter.
    ///
    /// Walks from the current state (0 steps back) to the oldest retained one. Every state
    /// receives the gradients the next deeper state will consume; parameter gradients of all
    /// steps are summed. The deepest state in the window treats the cell state before it as
    /// zero.
    ///
    /// # Parameters
    ///
    /// - `desired` - One row of `output_width` desired outputs per retained state, oldest first
    ///   (`available_steps_back() + 1` rows)
    ///
    /// # Errors
    ///
    /// - `ModelError::EmptyHistory` - If nothing has been processed
    /// - `ModelError::DimensionMismatch` - If the row count or row width is wrong
    pub fn gradients(&mut self, desired: ArrayView2<f64>) -> Result<WindowGradients, ModelError> {
        if self.history.is_empty() {
            return Err(ModelError::EmptyHistory);
        }
        let available = self.history.available_steps_back();
        validate_length("desired output rows", available + 1, desired.nrows())?;
        validate_length(
            "desired output",
            self.config.get_output_width(),
            desired.ncols(),
        )?;

        let mut gradients = self.history.current()?.parameters().zeros_like();
        let mut loss = 0.0;

        for steps_back in 0..=available {
            let neighbours = self.neighbours(steps_back, available)?;
            let row = desired.row(available - steps_back);
            loss += self
                .history
                .get_mut(steps_back)?
                .backward(row, neighbours, &mut gradients);
        }

        Ok(WindowGradients {
            parameters: gradients,
            loss,
        })
    }

    fn neighbours(&self, steps_back: usize, available: usize) -> Result<Neighbours, ModelError> {
        let mut neighbours = Neighbours::default();
        if steps_back > 0 {
            let later = self.history.get(steps_back - 1)?;
            neighbours.later_output_gradient = Some(later.output_gradient().clone());
            neighbours.later_cell_state_gradient = Some(later.cell_state_gradient().clone());
        }
        if steps_back < available {
            let deeper = self.history.get(steps_back + 1)?;
            neighbours.previous_cell_state = Some(deeper.cell_state().clone());
        }
        Ok(neighbours)
    }

    /// Trains on the retained window.
    ///
    /// Computes [`Network::gradients`] and applies one momentum and weight-decay step to the
    /// parameters. Only the current state's snapshot is replaced; older states keep theirs.
    ///
    /// # Parameters
    ///
    /// - `desired` - One row of desired outputs per retained state, oldest first
    ///
    /// # Returns
    ///
    /// * `f64` - Sum of squared errors over the window, before the update
    ///
    /// # Errors
    ///
    /// - `ModelError::EmptyHistory` - If nothing has been processed
    /// - `ModelError::DimensionMismatch` - If the row count or row width is wrong; no
    ///   parameter is touched
    pub fn learn(&mut self, desired: ArrayView2<f64>) -> Result<f64, ModelError> {
        let WindowGradients {
            parameters: gradients,
            loss,
        } = self.gradients(desired)?;

        // copies the parameters once if older states still share them
        let parameters = Arc::make_mut(&mut self.parameters);
        self.optimizer.step(parameters, &gradients)?;
        self.sync_current_state();

        debug!(
            steps = desired.nrows(),
            loss, "learned from truncation window"
        );
        Ok(loss)
    }
}
