// The client-side Dioxus application logic.

use dioxus::prelude::*;

mod app_state;
pub mod cart_context;
pub mod compat;
mod components;
pub mod hooks;
mod screens;

use app_state::AppState;
use cart::prefs::user_prefs::UserPrefs;
use cart_context::CartProvider;
use components::pico::Container;
use screens::storefront::StorefrontScreen;

//=============================================================================
// MAIN APPLICATION COMPONENT
//=============================================================================

#[allow(non_snake_case)]
pub fn App() -> Element {
    let css = r#"
    * { box-sizing: border-box; }

    .app-main-container header {
        padding: 0 1rem;
        --pico-nav-element-spacing-vertical: 0.5rem;
    }

    .app-main-container dialog footer {
        display: flex;
        justify-content: flex-end;
    }
"#;

    rsx! {
        document::Meta {
            name: "viewport",
            content: "width=device-width, initial-scale=1.0",
        }
        document::Stylesheet {
            href: "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.cyan.min.css",
        }
        style {
            "{css}"
        }
        AppBody {}
    }
}

#[component]
fn AppBody() -> Element {
    let prefs = UserPrefs::default();
    dioxus_logger::tracing::info!("prefs: {:#?}", prefs);

    rsx! {
        LoadedApp {
            app_state: AppState::new(prefs),
        }
    }
}

/// Provides app-wide state and mounts the one cart provider for the page.
#[component]
fn LoadedApp(app_state: AppState) -> Element {
    // Provide the stable, non-reactive AppState.
    use_context_provider(|| app_state.clone());

    let reset_delay = app_state.prefs.cart().reset_delay();

    rsx! {
        div {
            class: "app-main-container",
            Container {
                header {
                    nav {
                        ul {
                            li {
                                strong { "Storefront" }
                            }
                        }
                    }
                }
                CartProvider {
                    reset_delay,
                    StorefrontScreen {}
                }
            }
        }
    }
}
