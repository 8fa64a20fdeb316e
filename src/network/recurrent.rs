use serde::{Serialize, Deserialize};

/// Value every context slot holds before the first record is seen.
pub const NEUTRAL_CONTEXT: f64 = 0.5;

/// The context block of an Elman network: the first hidden layer's output
/// from the previous record, fed back as extra input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurrentState {
    context: Vec<f64>,
}

impl RecurrentState {
    pub fn new(size: usize) -> RecurrentState {
        RecurrentState { context: vec![NEUTRAL_CONTEXT; size] }
    }

    pub fn len(&self) -> usize {
        self.context.len()
    }

    pub fn is_empty(&self) -> bool {
        self.context.is_empty()
    }

    pub fn context(&self) -> &[f64] {
        &self.context
    }

    /// Stores the leading `len()` values of `hidden`. Slots beyond the end
    /// of a shorter `hidden` keep their previous value.
    pub fn capture(&mut self, hidden: &[f64]) {
        for (slot, &h) in self.context.iter_mut().zip(hidden) {
            *slot = h;
        }
    }

    /// Back to the neutral prior, e.g. before an unrelated sequence.
    pub fn reset(&mut self) {
        self.context.fill(NEUTRAL_CONTEXT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_takes_leading_hidden_values() {
        let mut state = RecurrentState::new(2);
        state.capture(&[0.1, 0.2, 0.3]);
        assert_eq!(state.context(), &[0.1, 0.2]);
    }

    #[test]
    fn capture_from_short_slice_keeps_remaining_slots() {
        let mut state = RecurrentState::new(3);
        state.capture(&[0.9]);
        assert_eq!(state.context(), &[0.9, NEUTRAL_CONTEXT, NEUTRAL_CONTEXT]);
        state.reset();
        assert_eq!(state.context(), &[NEUTRAL_CONTEXT; 3]);
    }
}
