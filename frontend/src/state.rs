use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ApiClient, ApiError};
use crate::models::{Message, Room, next_room_id};

/// Shared application state, provided via Leptos context.
#[derive(Clone, Copy)]
pub struct AppState {
    api: StoredValue<ApiClient, LocalStorage>,

    // --- Read signals (for components to subscribe to) ---
    pub rooms: ReadSignal<Vec<Room>>,
    pub active_room: ReadSignal<Option<i64>>,
    pub messages: ReadSignal<Vec<Message>>,
    pub is_sending: ReadSignal<bool>,
    pub error: ReadSignal<Option<String>>,

    // --- Write signals (for mutating state) ---
    pub set_rooms: WriteSignal<Vec<Room>>,
    pub set_active_room: WriteSignal<Option<i64>>,
    pub set_messages: WriteSignal<Vec<Message>>,
    pub set_is_sending: WriteSignal<bool>,
    pub set_error: WriteSignal<Option<String>>,
}

impl AppState {
    /// Create a new `AppState` around `api` and provide it in the current Leptos context.
    pub fn provide(api: ApiClient) -> Self {
        let (rooms, set_rooms) = signal(Vec::<Room>::new());
        let (active_room, set_active_room) = signal(None::<i64>);
        let (messages, set_messages) = signal(Vec::<Message>::new());
        let (is_sending, set_is_sending) = signal(false);
        let (error, set_error) = signal(None::<String>);

        let state = Self {
            api: StoredValue::new_local(api),
            rooms,
            active_room,
            messages,
            is_sending,
            error,
            set_rooms,
            set_active_room,
            set_messages,
            set_is_sending,
            set_error,
        };

        provide_context(state);
        state
    }

    fn report(&self, context: &str, err: ApiError) {
        log::error!("{context}: {err}");
        self.set_error.set(Some(err.to_string()));
    }

    /// Refresh the room list; the active room's transcript follows the server copy.
    pub fn load_rooms(&self) {
        let state = *self;
        let api = self.api.get_value();
        spawn_local(async move {
            match api.list_rooms().await {
                Ok(rooms) => state.apply_rooms(rooms),
                Err(e) => state.report("Failed to fetch rooms", e),
            }
        });
    }

    fn apply_rooms(&self, rooms: Vec<Room>) {
        let transcript = server_transcript(
            &rooms,
            self.active_room.get_untracked(),
            self.is_sending.get_untracked(),
        );
        if let Some(transcript) = transcript {
            self.set_messages.set(transcript);
        }
        self.set_rooms.set(rooms);
    }

    /// Make `room_id` the active room and load its transcript.
    pub fn open_room(&self, room_id: i64) {
        self.set_active_room.set(Some(room_id));
        self.set_messages.set(Vec::new());
        self.set_error.set(None);
        self.load_rooms();
    }

    /// Pick an unused room id from a fresh room list and hand it to `on_ready`.
    pub fn start_new_room(&self, on_ready: impl FnOnce(i64) + 'static) {
        let state = *self;
        let api = self.api.get_value();
        spawn_local(async move {
            match api.list_rooms().await {
                Ok(rooms) => {
                    let next = next_room_id(&rooms);
                    state.set_rooms.set(rooms);
                    match next {
                        Some(id) => on_ready(id),
                        None => {
                            log::error!("Failed to allocate a room: room ids exhausted");
                            state.set_error.set(Some("No free room id left.".to_string()));
                        }
                    }
                }
                Err(e) => state.report("Failed to allocate a room", e),
            }
        });
    }

    /// Post `text` to the active room and append the host's answer.
    pub fn send_prompt(&self, text: String) {
        let Some(room_id) = self.active_room.get_untracked() else {
            return;
        };
        let state = *self;
        let api = self.api.get_value();

        // Optimistically add the user message to the display
        self.set_messages.update(|msgs| msgs.push(Message::user(text.clone())));
        self.set_is_sending.set(true);
        self.set_error.set(None);

        spawn_local(async move {
            match api.post_chat(room_id, &text).await {
                Ok(answer) => {
                    // Ignore late answers for a room the user already left.
                    if state.active_room.get_untracked() == Some(room_id) {
                        state.set_messages.update(|msgs| msgs.push(Message::assistant(answer)));
                    }
                    // The room list changes after every turn (and a round may have ended).
                    let api = state.api.get_value();
                    match api.list_rooms().await {
                        Ok(rooms) => state.set_rooms.set(rooms),
                        Err(e) => state.report("Failed to refresh rooms", e),
                    }
                }
                Err(e) => state.report("Failed to send prompt", e),
            }
            state.set_is_sending.set(false);
        });
    }
}

/// The transcript to show for `active` after a room list refresh, or `None`
/// to keep the current one. A turn in flight owns the transcript, since the
/// server copy does not have its prompt yet.
fn server_transcript(rooms: &[Room], active: Option<i64>, is_sending: bool) -> Option<Vec<Message>> {
    if is_sending {
        return None;
    }
    let id = active?;
    Some(
        rooms
            .iter()
            .find(|r| r.room_id == id)
            .map(Room::visible_messages)
            .unwrap_or_default(),
    )
}
