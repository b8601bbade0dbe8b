pub mod cart_prefs;
pub mod log_level;
pub mod user_prefs;
