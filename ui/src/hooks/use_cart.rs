use crate::cart_context::CartContext;
use cart::ConfigurationError;
use dioxus::prelude::*;

/// Returns the nearest [`CartContext`].
///
/// Fails with [`ConfigurationError`] when the calling component is not inside
/// a `CartProvider`. There is no fallback signal: a missing provider is a
/// wiring bug and is surfaced to the caller.
pub fn use_cart() -> Result<CartContext, ConfigurationError> {
    try_use_context::<CartContext>().ok_or_else(|| ConfigurationError::outside_scope("use_cart"))
}
