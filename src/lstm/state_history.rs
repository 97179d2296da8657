use super::*;

/// Bounded ring of time-step states used by truncated BPTT.
///
/// With a truncation window of `T` the buffer has `2T + 1` slots and keeps at most `T + 1`
/// live states: the current one and the `T` before it. New states are written after the head,
/// so a push never moves memory except when the head reaches the last slot. Then the `T`
/// newest states are moved to the front in one pass, which amortizes to O(1) per push.
///
/// States are addressed relative to the head: `0` is the current state, `k` the state `k`
/// steps earlier.
///
/// # Example
/// ```rust
/// use rustylstm::lstm::StateHistory;
///
/// let history = StateHistory::new(3).unwrap();
/// assert!(history.is_empty());
/// assert_eq!(history.capacity(), 7);
/// assert_eq!(history.available_steps_back(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct StateHistory {
    slots: Vec<Option<State>>,
    truncation_window: usize,
    position: Option<usize>,
}

impl StateHistory {
    /// Creates an empty history for the given truncation window.
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - If `truncation_window` is 0
    pub fn new(truncation_window: usize) -> Result<Self, ModelError> {
        validate_dimension_greater_than_zero(truncation_window, "truncation_window")?;
        let capacity = 2 * truncation_window + 1;
        Ok(Self {
            slots: std::iter::repeat_with(|| None).take(capacity).collect(),
            truncation_window,
            position: None,
        })
    }

    /// Appends a state and makes it the current one.
    ///
    /// States that fall more than `T` steps behind are dropped here.
    pub fn push(&mut self, state: State) {
        let window = self.truncation_window;
        let position = match self.position {
            None => 0,
            Some(position) => {
                let position = if position == self.slots.len() - 1 {
                    self.compact(position)
                } else {
                    position
                };
                position + 1
            }
        };

        self.slots[position] = Some(state);
        if position > window {
            self.slots[position - window - 1] = None;
        }
        self.position = Some(position);
    }

    /// Moves the `T` newest states to the front and returns the new head position.
    fn compact(&mut self, position: usize) -> usize {
        let window = self.truncation_window;
        // this state would fall out of the window with the next push
        self.slots[position - window] = None;
        for offset in 0..window {
            self.slots.swap(offset, position - window + 1 + offset);
        }
        trace!(
            truncation_window = window,
            moved = window,
            "state history compacted"
        );
        window - 1
    }

    /// How many steps back `learn` may currently walk: `min(T, position)`
    pub fn available_steps_back(&self) -> usize {
        self.position
            .map_or(0, |position| position.min(self.truncation_window))
    }

    /// Whether a state exists `steps_back` steps before the current one
    pub fn has(&self, steps_back: usize) -> bool {
        self.position.is_some() && steps_back <= self.available_steps_back()
    }

    fn slot_index(&self, steps_back: usize) -> Result<usize, ModelError> {
        let position = self.position.ok_or(ModelError::EmptyHistory)?;
        let available = self.available_steps_back();
        if steps_back > available {
            return Err(ModelError::StepOutOfWindow {
                steps_back,
                available,
            });
        }
        Ok(position - steps_back)
    }

    /// Returns the state `steps_back` steps before the current one.
    ///
    /// # Errors
    ///
    /// - `ModelError::EmptyHistory` - If nothing has been pushed
    /// - `ModelError::StepOutOfWindow` - If `steps_back > available_steps_back()`
    pub fn get(&self, steps_back: usize) -> Result<&State, ModelError> {
        let index = self.slot_index(steps_back)?;
        self.slots[index].as_ref().ok_or_else(|| {
            ModelError::ProcessingError(format!("state history slot {} is empty", index))
        })
    }

    pub fn get_mut(&mut self, steps_back: usize) -> Result<&mut State, ModelError> {
        let index = self.slot_index(steps_back)?;
        self.slots[index].as_mut().ok_or_else(|| {
            ModelError::ProcessingError(format!("state history slot {} is empty", index))
        })
    }

    /// The current (most recent) state
    pub fn current(&self) -> Result<&State, ModelError> {
        self.get(0)
    }

    pub fn current_mut(&mut self) -> Result<&mut State, ModelError> {
        self.get_mut(0)
    }

    /// Number of live states
    pub fn len(&self) -> usize {
        if self.position.is_some() {
            self.available_steps_back() + 1
        } else {
            0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none()
    }

    /// Number of slots, `2T + 1`
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn truncation_window(&self) -> usize {
        self.truncation_window
    }

    /// Drops every state
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.position = None;
    }
}
