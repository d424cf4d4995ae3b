mod api;
mod components;
mod models;
mod router;
mod state;

use leptos::mount::mount_to_body;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};

use api::ApiClient;
use components::chat::ChatRoomPage;
use components::home::HomePage;
use components::sidebar::Sidebar;
use router::{CHAT_PATH, HOME_PATH};
use state::AppState;

/// Root application component.
#[component]
fn App() -> impl IntoView {
    let api = ApiClient::from_build_env();
    log::info!("Using backend at {}", api.base_url());

    let state = AppState::provide(api);
    state.load_rooms();

    view! {
        <Router>
            <div class="app-container">
                <Sidebar />
                <Routes fallback=|| view! { <main class="chat-area">"Page not found."</main> }>
                    <Route path=HOME_PATH view=HomePage />
                    <Route path=CHAT_PATH view=ChatRoomPage />
                </Routes>
            </div>
        </Router>
    }
}

fn main() {
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str("logger was already initialised"));
    }
    mount_to_body(App);
}
