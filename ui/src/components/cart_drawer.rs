//=============================================================================
// File: src/components/cart_drawer.rs
//=============================================================================
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Modal;
use crate::hooks::use_cart_opened;
use dioxus::prelude::*;

/// Consumer side of the cart signal.
///
/// Becomes visible on every trigger and stays open until the shopper closes
/// it; the signal's own auto-reset does not hide it.
#[component]
pub fn CartDrawer() -> Element {
    let mut is_open = use_signal(|| false);

    let wired = use_cart_opened(move || is_open.set(true));

    if let Err(e) = wired {
        return rsx! {
            p { class: "pico-color-red", "An error occurred: {e}" }
        };
    }

    rsx! {
        Modal {
            is_open,
            title: "Your cart",
            p { "Item added to your cart." }
            footer {
                Button {
                    button_type: ButtonType::Secondary,
                    on_click: move |_| is_open.set(false),
                    "Keep shopping"
                }
            }
        }
    }
}
