//! Shared components for the storefront: the cart producer and consumer, plus
//! thin Pico.css wrappers they are built from.
pub mod add_to_cart_button;
pub mod cart_drawer;
pub mod pico;
