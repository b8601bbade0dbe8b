//=============================================================================
// File: src/screens/storefront.rs
//=============================================================================
use crate::components::add_to_cart_button::AddToCartButton;
use crate::components::cart_drawer::CartDrawer;
use crate::components::pico::Card;
use crate::components::pico::Grid;
use dioxus::prelude::*;

struct Product {
    name: &'static str,
    price: &'static str,
}

static CATALOG: [Product; 3] = [
    Product {
        name: "Canvas tote",
        price: "$24.00",
    },
    Product {
        name: "Enamel mug",
        price: "$14.50",
    },
    Product {
        name: "Sticker pack",
        price: "$6.00",
    },
];

/// Product list with one producer per item and the single cart consumer.
#[component]
pub fn StorefrontScreen() -> Element {
    rsx! {
        Grid {
            for product in CATALOG.iter() {
                Card {
                    key: "{product.name}",
                    h4 { "{product.name}" }
                    p { "{product.price}" }
                    AddToCartButton {
                        product: product.name.to_string(),
                    }
                }
            }
        }
        CartDrawer {}
    }
}
