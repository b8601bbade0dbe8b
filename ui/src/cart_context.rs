//! Provides the cart-open signal to a Dioxus subtree.

use crate::compat;
use cart::{
    AutoReset, CartSignal, CartState, ConfigurationError, ResetTicket, Subscription,
    DEFAULT_RESET_DELAY,
};
use dioxus::prelude::*;
use dioxus_logger::tracing::info;
use std::rc::Rc;
use std::time::Duration;

/// The cart signal as seen from inside a [`CartProvider`].
///
/// Obtain it with [`crate::hooks::use_cart`]. Producers call
/// [`CartContext::trigger_open`]; consumers read [`CartContext::should_open`]
/// in render to re-render on every transition, or subscribe for a
/// synchronous callback.
#[derive(Clone)]
pub struct CartContext {
    signal: CartSignal,
    /// Reactive mirror of `signal`, updated on every transition.
    state: Signal<CartState>,
    reset: Coroutine<ResetTicket>,
}

impl CartContext {
    /// Reactive read; subscribes the calling component.
    pub fn should_open(&self) -> bool {
        self.state.read().should_open
    }

    /// Non-reactive read of the underlying signal.
    pub fn snapshot(&self) -> Result<CartState, ConfigurationError> {
        self.signal.state()
    }

    /// Raises the signal and (re-)arms the provider's auto-reset.
    pub fn trigger_open(&self) -> Result<(), ConfigurationError> {
        let ticket = self.signal.trigger_open()?;
        self.reset.send(ticket);
        Ok(())
    }

    pub fn subscribe(&self, listener: impl Fn(CartState) + 'static) -> Subscription {
        self.signal.subscribe(listener)
    }
}

/// Owns one cart signal for its children.
///
/// The auto-reset runs as a coroutine of this component, so it is dropped
/// together with the provider. `reset_delay` is read once, on mount.
#[component]
pub fn CartProvider(
    #[props(default = DEFAULT_RESET_DELAY)] reset_delay: Duration,
    children: Element,
) -> Element {
    let signal = use_hook(|| {
        info!("mounting cart provider, reset delay {:?}", reset_delay);
        CartSignal::new()
    });
    let state = use_signal(CartState::default);

    use_hook({
        let signal = signal.clone();
        move || {
            Rc::new(signal.subscribe(move |next| {
                // the mirror may already be gone while the provider unmounts
                let mut state = state;
                if let Ok(mut current) = state.try_write() {
                    *current = next;
                };
            }))
        }
    });

    let reset = use_coroutine({
        let signal = signal.clone();
        move |tickets: UnboundedReceiver<ResetTicket>| {
            AutoReset::new(signal.clone(), reset_delay, tickets).run(compat::sleep)
        }
    });

    use_context_provider(|| CartContext {
        signal: signal.clone(),
        state,
        reset,
    });

    use_drop(move || {
        info!("unmounting cart provider");
        signal.teardown();
    });

    rsx! {
        {children}
    }
}
