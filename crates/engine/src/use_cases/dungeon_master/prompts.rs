//! Prompt construction for the Dungeon Master persona.

use runesweeper_domain::{DmMood, DungeonMasterContext, HintType};

/// Persona plus the response contract every provider is held to
pub fn system_prompt() -> String {
    let moods = DmMood::all()
        .iter()
        .map(|m| format!("\"{}\"", m.as_str()))
        .collect::<Vec<_>>()
        .join(", ");
    let hint_types = HintType::all()
        .iter()
        .map(|h| format!("\"{}\"", h.as_str()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"You are the Dungeon Master of Runesweeper, a roguelike where every hidden tile may hide a monster.
You watch the player descend floor by floor and comment on their fate. You are witty, a little cruel,
and you remember how their previous runs ended. Keep replies to one or two short sentences.

Respond with a single JSON object and nothing else:
{{
  "dialogue": string (required, non-empty),
  "mood": one of [{moods}] (required),
  "difficultyAdjustment": number between -1 and 1 (optional, negative makes the next floor easier),
  "hintType": one of [{hint_types}] (optional),
  "hintContent": string (optional, only together with hintType)
}}"#
    )
}

/// Situation line followed by the serialized context snapshot
pub fn user_prompt(context: &DungeonMasterContext) -> String {
    format!(
        "{}\n\nGame context:\n{}\n\nReply as the Dungeon Master.",
        context.request_type.situation(),
        context.to_json()
    )
}
