//=============================================================================
// File: src/components/add_to_cart_button.rs
//=============================================================================
use crate::components::pico::Button;
use crate::hooks::use_cart;
use dioxus::prelude::*;
use dioxus_logger::tracing::{error, info};

/// Producer side of the cart signal: asks the cart surface to open.
#[component]
pub fn AddToCartButton(product: String) -> Element {
    let cart = use_cart();

    match cart {
        Ok(cart) => rsx! {
            Button {
                on_click: move |_| {
                    info!("added {} to cart", product);
                    if let Err(e) = cart.trigger_open() {
                        error!("could not open cart: {}", e);
                    }
                },
                "Add to cart"
            }
        },
        // a missing provider is a wiring bug; show it instead of a dead button
        Err(e) => rsx! {
            p { class: "pico-color-red", "An error occurred: {e}" }
        },
    }
}
