use super::cart_prefs::CartPrefs;
use super::log_level::LogLevel;
use serde::Deserialize;
use serde::Serialize;

/// Represents all user prefs. Intended for saving to a file, editing in a settings dialog, etc.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct UserPrefs {
    cart: CartPrefs,
    log_level: LogLevel,
}

impl UserPrefs {
    pub fn new(cart: CartPrefs, log_level: LogLevel) -> Self {
        Self { cart, log_level }
    }

    /// Reads every preference from its environment variable.
    pub fn from_env() -> Self {
        Self::new(CartPrefs::from_env(), LogLevel::from_env())
    }

    pub fn cart(&self) -> &CartPrefs {
        &self.cart
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }
}

impl Default for UserPrefs {
    fn default() -> Self {
        Self::from_env()
    }
}
