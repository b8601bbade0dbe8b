use super::use_cart::use_cart;
use cart::{CartEdge, ConfigurationError, EdgeDetector};
use dioxus::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Calls `on_open` once for every false -> true transition of the cart
/// signal, synchronously with the trigger.
///
/// The callback captured on the first render is kept for the lifetime of the
/// component; the subscription ends when the component unmounts.
pub fn use_cart_opened(on_open: impl FnMut() + 'static) -> Result<(), ConfigurationError> {
    let cart = use_cart();

    use_hook(|| {
        let cart = cart.as_ref().ok()?;
        let initial = cart.snapshot().ok()?;
        let edges = RefCell::new(EdgeDetector::new(initial));
        let on_open = RefCell::new(on_open);
        Some(Rc::new(cart.subscribe(move |state| {
            if edges.borrow_mut().observe(state) == Some(CartEdge::Opened) {
                (*on_open.borrow_mut())();
            }
        })))
    });

    cart.map(|_| ())
}
