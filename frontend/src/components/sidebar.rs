use leptos::prelude::*;
use leptos_router::components::A;

use crate::router::{AppRoute, use_current_route};
use crate::models::Room;
use crate::state::AppState;

/// Sidebar showing rooms with a round in progress and a "New game" link.
#[component]
pub fn Sidebar() -> impl IntoView {
    let state = expect_context::<AppState>();
    let current = use_current_route();
    let home_href = AppRoute::Home.href();
    let new_game_href = AppRoute::Chat { room_id: None }.href();

    view! {
        <aside class="sidebar" data-route=move || current.get().map(|r| r.name())>
            <div class="sidebar-header">
                <h2>
                    <A href=home_href>"Brain Teasers"</A>
                </h2>
                <A href=new_game_href attr:class="new-chat-btn">
                    "+ New game"
                </A>
            </div>
            <div class="conversation-list">
                {move || {
                    if state.rooms.get().is_empty() {
                        view! {
                            <div style="padding:1rem;color:var(--text-secondary);font-size:0.85rem">
                                "No games in progress"
                            </div>
                        }.into_any()
                    } else {
                        view! {
                            <For
                                each=move || state.rooms.get()
                                key=row_key
                                let:room
                            >
                                {
                                    let route = AppRoute::chat(room.room_id);
                                    let href = route.href();
                                    let turns = room.visible_messages().len();
                                    view! {
                                        <A href=href attr:class="conversation-item">
                                            <span
                                                class:active=move || current.get().as_ref() == Some(&route)
                                            >
                                                {format!("Room {} · {turns} messages", room.room_id)}
                                            </span>
                                        </A>
                                    }
                                }
                            </For>
                        }.into_any()
                    }
                }}
            </div>
        </aside>
    }
}

/// A row is rebuilt when its room gains messages, so the count it shows stays
/// current.
fn row_key(room: &Room) -> (i64, usize) {
    (room.room_id, room.chat_message_list.len())
}
