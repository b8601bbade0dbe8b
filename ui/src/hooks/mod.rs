pub mod use_cart;
pub mod use_cart_opened;

pub use use_cart::use_cart;
pub use use_cart_opened::use_cart_opened;
