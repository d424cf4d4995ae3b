//! System prompt and keyword detection for the riddle game host.

/// Prompts that ask the host to pose a new riddle.
const START_COMMANDS: &[&str] = &["start", "开始"];

/// Phrases the host must emit when a round ends.
const GAME_OVER_MARKERS: &[&str] = &["game over", "游戏结束"];

pub fn is_start_command(user_prompt: &str) -> bool {
    let prompt = user_prompt.trim().to_lowercase();
    START_COMMANDS.iter().any(|c| prompt == *c)
}

pub fn is_game_over(answer: &str) -> bool {
    let answer = answer.to_lowercase();
    GAME_OVER_MARKERS.iter().any(|m| answer.contains(m))
}

/// Builds the host's rules, listing every riddle already used in the room so
/// the model does not repeat one.
pub fn build_system_prompt(posed_riddles: &[String]) -> String {
    let history = if posed_riddles.is_empty() {
        "(none yet)".to_string()
    } else {
        posed_riddles
            .iter()
            .map(|q| format!("- {q}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "You host a lateral-thinking \"yes/no\" riddle game.

[Posing a riddle]
1. When the player says \"start\" (or \"开始\"), immediately invent a brand new riddle \
that has never appeared in any conversation.
2. Give it a distinctive setting, cast and details. Avoid well-known internet riddles.
3. Pick a random theme each time (mystery, comedy, daily life, school, science fiction, ...).
4. Never reuse a riddle from this list of riddles already used in this room:
{history}
5. After posing the riddle you may only answer: Yes / No / Irrelevant.

[Answering]
After each player question answer with exactly one of the three options. \
Give a gentle hint only when the player is clearly stuck.

[Ending the game]
The game ends when the player asks to quit or for the answer, guesses correctly, \
or has asked 10 questions. When it ends you must write \"Game over\" and then \
explain the full solution.

[Reminder]
On \"start\" always create a new riddle instead of answering yes or no.
Flow: start -> riddle -> questions -> end."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_command_matches_trimmed_and_case_insensitive() {
        assert!(is_start_command("start"));
        assert!(is_start_command("  Start \n"));
        assert!(is_start_command("开始"));
        assert!(!is_start_command("restart"));
        assert!(!is_start_command("is it a cat?"));
    }

    #[test]
    fn game_over_marker_is_found_anywhere() {
        assert!(is_game_over("Correct! Game over. The man was a lighthouse keeper."));
        assert!(is_game_over("游戏结束，汤底是……"));
        assert!(!is_game_over("No."));
    }

    #[test]
    fn system_prompt_lists_posed_riddles() {
        let prompt = build_system_prompt(&["The silent violinist".to_string()]);
        assert!(prompt.contains("- The silent violinist"));

        let empty = build_system_prompt(&[]);
        assert!(empty.contains("(none yet)"));
    }
}
