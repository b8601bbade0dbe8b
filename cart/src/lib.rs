//! Shared cart-open signalling for the storefront UI.
//!
//! This crate has no UI framework dependency. The `ui` crate wraps it in a
//! Dioxus context provider; any other host can use [`CartScope`] directly.

pub mod auto_reset;
pub mod edge;
pub mod error;
pub mod prefs;
pub mod scope;
pub mod signal;
pub mod state;

pub use auto_reset::AutoReset;
pub use edge::{CartEdge, EdgeDetector};
pub use error::ConfigurationError;
pub use scope::{current, get_state, trigger_open, CartHandle, CartScope, EnteredScope};
pub use signal::{CartSignal, ResetTicket, Subscription};
pub use state::CartState;

use std::time::Duration;

/// How long `should_open` stays raised after the most recent trigger.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(100);
