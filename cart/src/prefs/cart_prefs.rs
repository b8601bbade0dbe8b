use crate::DEFAULT_RESET_DELAY;
use serde::Deserialize;
use serde::Serialize;
use std::env;
use std::time::Duration;

/// Tunables for the cart-open signal.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CartPrefs {
    /// How long the signal stays raised after a trigger, in milliseconds.
    reset_delay_ms: u64,
}

impl CartPrefs {
    pub fn new(reset_delay: Duration) -> Self {
        Self {
            reset_delay_ms: reset_delay.as_millis() as u64,
        }
    }

    /// Creates a CartPrefs instance from environment variables, falling back
    /// to the in-code defaults.
    ///
    /// # Environment Variables
    /// - `CART_RESET_DELAY_MS`: milliseconds before the cart signal lowers
    ///   again. Zero or unparsable values use the default of 100.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let reset_delay_ms = lookup("CART_RESET_DELAY_MS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_RESET_DELAY.as_millis() as u64);

        Self { reset_delay_ms }
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}

impl Default for CartPrefs {
    fn default() -> Self {
        Self::from_env()
    }
}
