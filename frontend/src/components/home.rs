use leptos::prelude::*;
use leptos_router::components::A;

use crate::router::AppRoute;
use crate::state::AppState;

/// Landing view: how the game works and a way into a fresh room.
#[component]
pub fn HomePage() -> impl IntoView {
    let state = expect_context::<AppState>();

    // Leaving a room clears the transcript shown in the chat view.
    state.set_active_room.set(None);
    state.set_error.set(None);

    let new_game_href = AppRoute::Chat { room_id: None }.href();

    view! {
        <main class="chat-area">
            <div class="chat-header">"Welcome"</div>
            <div class="messages-container">
                <div class="empty-state">
                    <p>"The host thinks up a riddle. You ask yes/no questions until you crack it."</p>
                    <p>"Say \"start\" in a room to get a riddle. Ask for the answer any time to end the round."</p>
                    <A href=new_game_href attr:class="send-btn">
                        "Start a new game"
                    </A>
                    <p>
                        {move || match state.rooms.get().len() {
                            0 => "No games in progress.".to_string(),
                            1 => "1 game in progress.".to_string(),
                            n => format!("{n} games in progress."),
                        }}
                    </p>
                </div>
            </div>
        </main>
    }
}
