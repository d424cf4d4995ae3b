use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::agent::ChatAgent;
use crate::errors::AppError;
use crate::models::{ChatMessage, ChatRoom, MessageRole};
use crate::service::prompt;

const MAX_MESSAGE_LENGTH: usize = 8000;

#[derive(Debug, Default)]
struct RoomState {
    /// Current round, system prompt first. Empty between rounds.
    history: Vec<ChatMessage>,
    /// Every riddle posed in this room, kept across rounds.
    riddles: Vec<String>,
}

#[derive(Clone)]
pub struct ChatService {
    rooms: Arc<Mutex<HashMap<i64, RoomState>>>,
    turn_locks: Arc<Mutex<HashMap<i64, Arc<Mutex<()>>>>>,
    agent: Arc<dyn ChatAgent>,
}

impl ChatService {
    pub fn new(agent: Arc<dyn ChatAgent>) -> Self {
        Self {
            rooms: Arc::default(),
            turn_locks: Arc::default(),
            agent,
        }
    }

    /// Rooms with a round in progress, ordered by id.
    pub async fn list_rooms(&self) -> Vec<ChatRoom> {
        let rooms = self.rooms.lock().await;
        let mut list: Vec<ChatRoom> = rooms
            .iter()
            .filter(|(_, state)| !state.history.is_empty())
            .map(|(id, state)| ChatRoom {
                room_id: *id,
                chat_message_list: state.history.clone(),
            })
            .collect();
        list.sort_by_key(|r| r.room_id);
        list
    }

    /// Plays one turn in `room_id` and returns the host's answer.
    pub async fn chat(&self, room_id: i64, user_prompt: &str) -> Result<String, AppError> {
        // ── Validation ────────────────────────────────────────────────────────
        if room_id <= 0 {
            return Err(AppError::InvalidRoomId { room_id });
        }
        if user_prompt.trim().is_empty() {
            return Err(AppError::EmptyField { field_name: "userPrompt".to_string() });
        }
        if user_prompt.len() > MAX_MESSAGE_LENGTH {
            return Err(AppError::FieldTooLong {
                field_name: "userPrompt".to_string(),
                max_length: MAX_MESSAGE_LENGTH,
                actual_length: user_prompt.len(),
            });
        }

        // Turns in the same room run one at a time.
        let turn_lock = self.turn_lock(room_id).await;
        let result = {
            let _turn = turn_lock.lock().await;
            self.play_turn(room_id, user_prompt).await
        };
        self.release_turn_lock(room_id, turn_lock).await;
        result
    }

    /// Runs one turn. The caller holds the room's turn lock.
    async fn play_turn(&self, room_id: i64, user_prompt: &str) -> Result<String, AppError> {
        // ── Snapshot the room ─────────────────────────────────────────────────
        let (system_prompt, mut messages) = {
            let rooms = self.rooms.lock().await;
            match rooms.get(&room_id) {
                Some(state) => (
                    prompt::build_system_prompt(&state.riddles),
                    state
                        .history
                        .iter()
                        .filter(|m| m.role != MessageRole::System)
                        .cloned()
                        .collect::<Vec<_>>(),
                ),
                None => (prompt::build_system_prompt(&[]), Vec::new()),
            }
        };

        // ── Ask the host ──────────────────────────────────────────────────────
        let answer = self.agent.chat(&system_prompt, &messages, user_prompt).await?;
        if answer.trim().is_empty() {
            warn!(room_id, "Agent returned an empty completion");
            return Err(AppError::EmptyCompletion);
        }

        messages.insert(0, ChatMessage::system(system_prompt));
        messages.push(ChatMessage::user(user_prompt));
        messages.push(ChatMessage::assistant(answer.clone()));

        // ── Commit ────────────────────────────────────────────────────────────
        let mut rooms = self.rooms.lock().await;
        let state = rooms.entry(room_id).or_default();

        if prompt::is_start_command(user_prompt) {
            let riddle = answer.trim().to_string();
            if !state.riddles.contains(&riddle) {
                state.riddles.push(riddle);
            }
        }

        if prompt::is_game_over(&answer) {
            info!(room_id, "Round finished, clearing room history");
            state.history.clear();
        } else {
            state.history = messages;
        }

        Ok(answer)
    }

    async fn turn_lock(&self, room_id: i64) -> Arc<Mutex<()>> {
        let mut locks = self.turn_locks.lock().await;
        locks.entry(room_id).or_default().clone()
    }

    /// Forgets the turn lock of a room that never got stored, unless another
    /// turn is already waiting on it.
    async fn release_turn_lock(&self, room_id: i64, turn_lock: Arc<Mutex<()>>) {
        if self.rooms.lock().await.contains_key(&room_id) {
            return;
        }
        let mut locks = self.turn_locks.lock().await;
        // One reference in the map, one held here.
        if Arc::strong_count(&turn_lock) <= 2 {
            locks.remove(&room_id);
        }
    }
}
