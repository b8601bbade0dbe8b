use cart::prefs::user_prefs::UserPrefs;

fn main() {
    let prefs = UserPrefs::from_env();
    dioxus_logger::init(prefs.log_level().into()).expect("failed to init logger");
    dioxus_logger::tracing::info!("starting storefront desktop shell");
    dioxus::launch(ui::App);
}
