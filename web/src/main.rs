use cart::prefs::user_prefs::UserPrefs;

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let prefs = UserPrefs::from_env();
    dioxus_logger::init(prefs.log_level().into()).expect("failed to init logger");
    dioxus::launch(ui::App);
}
