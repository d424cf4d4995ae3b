use serde::{Deserialize, Serialize};

/// Matches the backend `ChatMessage` model. `role` stays a plain string so
/// unknown roles still render.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: "assistant".to_string(), content: content.into() }
    }

    pub fn is_system(&self) -> bool {
        self.role.eq_ignore_ascii_case("system")
    }
}

/// Matches the backend `ChatRoom` model.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub room_id: i64,
    #[serde(default)]
    pub chat_message_list: Vec<Message>,
}

impl Room {
    /// Messages worth showing to the player (the host's rules are hidden).
    pub fn visible_messages(&self) -> Vec<Message> {
        self.chat_message_list
            .iter()
            .filter(|m| !m.is_system())
            .cloned()
            .collect()
    }
}

/// Id for a fresh room: one past the highest id in use, or `None` when
/// the highest id is already `i64::MAX`.
pub fn next_room_id(rooms: &[Room]) -> Option<i64> {
    rooms.iter().map(|r| r.room_id).max().unwrap_or(0).checked_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_messages_skip_system_prompt() {
        let room = Room {
            room_id: 1,
            chat_message_list: vec![
                Message { role: "SYSTEM".into(), content: "rules".into() },
                Message::user("start"),
                Message::assistant("riddle"),
            ],
        };
        assert_eq!(
            room.visible_messages(),
            vec![Message::user("start"), Message::assistant("riddle")]
        );
    }

    #[test]
    fn next_room_id_follows_highest() {
        assert_eq!(next_room_id(&[]), Some(1));
        let rooms = vec![
            Room { room_id: 4, chat_message_list: vec![] },
            Room { room_id: 2, chat_message_list: vec![] },
        ];
        assert_eq!(next_room_id(&rooms), Some(5));
    }

    #[test]
    fn next_room_id_is_none_after_the_last_id() {
        let rooms = vec![Room { room_id: i64::MAX, chat_message_list: vec![] }];
        assert_eq!(next_room_id(&rooms), None);
    }
}
