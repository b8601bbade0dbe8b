//! Edge detection for consumers that act once per trigger.

use crate::state::CartState;

/// A transition of the cart signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumIs, strum::Display)]
pub enum CartEdge {
    /// false -> true: a producer asked for the cart.
    Opened,
    /// true -> false: the auto-reset fired.
    Closed,
}

/// Remembers the last observed value and reports transitions.
///
/// Consumers that receive every value (including repeats, as a re-rendering
/// component does) feed each one in and act only on the edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeDetector {
    last: CartState,
}

impl EdgeDetector {
    pub fn new(initial: CartState) -> Self {
        Self { last: initial }
    }

    pub fn observe(&mut self, state: CartState) -> Option<CartEdge> {
        let previous = std::mem::replace(&mut self.last, state);
        match (previous.should_open, state.should_open) {
            (false, true) => Some(CartEdge::Opened),
            (true, false) => Some(CartEdge::Closed),
            _ => None,
        }
    }
}
