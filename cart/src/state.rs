//! The value published by the cart signal.

use serde::Deserialize;
use serde::Serialize;

/// Snapshot of the cart signal as seen by subscribers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    /// `true` for a short window after a trigger, `false` otherwise.
    pub should_open: bool,
}

impl CartState {
    pub const CLOSED: Self = Self { should_open: false };
    pub const OPEN: Self = Self { should_open: true };
}
