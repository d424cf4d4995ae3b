use leptos::ev;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::router::{AppRoute, ROOM_ID_PARAM};
use crate::state::AppState;

/// Parses the raw `roomId` route parameter. Only positive integers name a room.
pub fn parse_room_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

/// Chat view for `/chat/:roomId?`. Without a room id a fresh room is
/// allocated and the URL is replaced with it.
#[component]
pub fn ChatRoomPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let params = use_params_map();
    let navigate = use_navigate();

    let room_param = move || params.read().get(ROOM_ID_PARAM);

    Effect::new(move || match room_param() {
        None => {
            let navigate = navigate.clone();
            state.start_new_room(move |id| {
                navigate(
                    &AppRoute::chat(id).href(),
                    NavigateOptions { replace: true, ..Default::default() },
                );
            });
        }
        Some(raw) => match parse_room_id(&raw) {
            Some(id) => state.open_room(id),
            None => {
                state.set_active_room.set(None);
                state.set_messages.set(Vec::new());
                state.set_error.set(Some(format!("'{raw}' is not a valid room number")));
            }
        },
    });

    view! {
        <main class="chat-area">
            // Error banner
            {move || {
                state.error.get().map(|err| {
                    view! {
                        <div class="error-banner">{err}</div>
                    }
                })
            }}

            // Chat header
            <div class="chat-header">
                {move || match state.active_room.get() {
                    Some(id) => format!("Room {id}"),
                    None => "Preparing a room…".to_string(),
                }}
            </div>

            // Messages
            <div class="messages-container">
                {move || {
                    if state.messages.get().is_empty() {
                        view! {
                            <div class="empty-state">
                                "Say \"start\" to get a new riddle"
                            </div>
                        }.into_any()
                    } else {
                        view! {
                            <For
                                each=move || state.messages.get().into_iter().enumerate()
                                key=|(i, m)| (*i, m.content.clone())
                                let:item
                            >
                                <MessageBubble role=item.1.role.clone() content=item.1.content.clone() />
                            </For>
                            {move || {
                                state.is_sending.get().then(|| view! {
                                    <div class="message assistant">
                                        <div class="role-label">"host"</div>
                                        <div class="streaming-cursor">"…"</div>
                                    </div>
                                })
                            }}
                        }.into_any()
                    }
                }}
            </div>

            // Input area
            <ChatInput />
        </main>
    }
}

/// A single chat message bubble.
#[component]
fn MessageBubble(role: String, content: String) -> impl IntoView {
    let css_class = if role == "user" {
        "message user"
    } else {
        "message assistant"
    };
    let label = if role == "user" { "you" } else { "host" };

    view! {
        <div class=css_class>
            <div class="role-label">{label}</div>
            <div>{content}</div>
        </div>
    }
}

/// Chat input form with textarea and send button.
#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<AppState>();
    let (input, set_input) = signal(String::new());

    let is_blocked = move || state.is_sending.get() || state.active_room.get().is_none();

    let send = move || {
        let text = input.get().trim().to_string();
        if text.is_empty() || is_blocked() {
            return;
        }
        set_input.set(String::new());
        state.send_prompt(text);
    };

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            send();
        }
    };

    let on_submit = move |_| {
        send();
    };

    view! {
        <div class="input-area">
            <div class="input-row">
                <textarea
                    rows="1"
                    placeholder="Ask a yes/no question… (Enter to send, Shift+Enter for newline)"
                    prop:value=input
                    on:input=move |ev| {
                        set_input.set(event_target_value(&ev));
                    }
                    on:keydown=on_keydown
                    disabled=is_blocked
                />
                <button
                    class="send-btn"
                    on:click=on_submit
                    disabled=move || is_blocked() || input.get().trim().is_empty()
                >
                    {move || if state.is_sending.get() { "Sending…" } else { "Send" }}
                </button>
            </div>
        </div>
    }
}
