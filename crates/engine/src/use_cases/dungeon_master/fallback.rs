//! Fallback catalog - canned Dungeon Master lines.
//!
//! Used when the cooldown gate is closed or every provider failed. Selection
//! takes an injected `random` closure so tests can pin the choice.

use std::collections::HashMap;

use runesweeper_domain::{DmMood, DmResponse, HintType, RequestType};

/// Highest random sample used for indexing, keeps `index < len`
const MAX_RANDOM: f64 = 0.999_999;

struct CannedLine {
    dialogue: &'static str,
    mood: DmMood,
    hint: Option<(HintType, &'static str)>,
}

const fn line(dialogue: &'static str, mood: DmMood) -> CannedLine {
    CannedLine {
        dialogue,
        mood,
        hint: None,
    }
}

const fn hinted(
    dialogue: &'static str,
    mood: DmMood,
    hint_type: HintType,
    hint: &'static str,
) -> CannedLine {
    CannedLine {
        dialogue,
        mood,
        hint: Some((hint_type, hint)),
    }
}

const FLOOR_START: &[CannedLine] = &[
    line(
        "Another floor, another chance to disappoint me. Step carefully.",
        DmMood::Amused,
    ),
    hinted(
        "Fresh stone, fresh monsters. Let's see what you make of this one.",
        DmMood::Curious,
        HintType::Tip,
        "Corners touch fewer tiles. They are a safer place to start.",
    ),
    line(
        "Deeper you go. The dungeon remembers every step you take.",
        DmMood::Menacing,
    ),
];

const RUNE_ACQUIRED: &[CannedLine] = &[
    line(
        "A new rune. Power has a way of changing its bearer.",
        DmMood::Curious,
    ),
    line(
        "Shiny. I wonder if you'll live long enough to use it.",
        DmMood::Amused,
    ),
];

const LOW_HEALTH: &[CannedLine] = &[
    hinted(
        "Your blood paints the floor. Perhaps slow down?",
        DmMood::Menacing,
        HintType::Warning,
        "Flag the tiles you are sure about before revealing more.",
    ),
    line(
        "Barely standing. I've seen braver corpses.",
        DmMood::Amused,
    ),
    line(
        "Careful now. One more mistake and this run is over.",
        DmMood::Sympathetic,
    ),
];

const NEAR_DEATH: &[CannedLine] = &[
    line(
        "That should have killed you. Interesting.",
        DmMood::Impressed,
    ),
    line(
        "Death brushed past you just now. It will not miss twice.",
        DmMood::Menacing,
    ),
];

const DEATH: &[CannedLine] = &[
    line(
        "And so another adventurer joins the dungeon floor. Again?",
        DmMood::Amused,
    ),
    hinted(
        "A valiant effort. The dungeon thanks you for the snack.",
        DmMood::Sympathetic,
        HintType::Lore,
        "Every fallen adventurer feeds the runes a little more.",
    ),
    line("Rest now. The stones will keep your bones.", DmMood::Sympathetic),
];

const VICTORY: &[CannedLine] = &[
    line(
        "You actually did it. I'll pretend I'm not impressed.",
        DmMood::Impressed,
    ),
    line(
        "Victory. Enjoy it. The next dungeon won't be so kind.",
        DmMood::Menacing,
    ),
];

const IDLE_TAUNT: &[CannedLine] = &[
    line(
        "Thinking hard? The monsters are patient. I am not.",
        DmMood::Amused,
    ),
    hinted(
        "Hesitation is a kind of answer too.",
        DmMood::Curious,
        HintType::Tip,
        "Count the numbers around a tile before you commit.",
    ),
];

fn canned_lines(request_type: RequestType) -> &'static [CannedLine] {
    match request_type {
        RequestType::FloorStart => FLOOR_START,
        RequestType::RuneAcquired => RUNE_ACQUIRED,
        RequestType::LowHealth => LOW_HEALTH,
        RequestType::NearDeath => NEAR_DEATH,
        RequestType::Death => DEATH,
        RequestType::Victory => VICTORY,
        RequestType::IdleTaunt => IDLE_TAUNT,
    }
}

fn to_response(canned: &CannedLine) -> Option<DmResponse> {
    let response = DmResponse::new(canned.dialogue, canned.mood).ok()?;
    Some(match canned.hint {
        Some((hint_type, content)) => response.with_hint(hint_type, Some(content)),
        None => response,
    })
}

/// Canned responses per request type.
#[derive(Debug, Clone)]
pub struct FallbackCatalog {
    entries: HashMap<RequestType, Vec<DmResponse>>,
}

impl Default for FallbackCatalog {
    fn default() -> Self {
        let entries = RequestType::all()
            .iter()
            .map(|rt| {
                let responses: Vec<DmResponse> =
                    canned_lines(*rt).iter().filter_map(to_response).collect();
                (*rt, responses)
            })
            .collect();
        Self { entries }
    }
}

impl FallbackCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with a custom table
    pub fn with_entries(entries: HashMap<RequestType, Vec<DmResponse>>) -> Self {
        Self { entries }
    }

    pub fn responses_for(&self, request_type: RequestType) -> &[DmResponse] {
        self.entries
            .get(&request_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Pick a canned response.
    ///
    /// `index = floor(clamp(random(), 0, 0.999999) * len)`. NaN samples count
    /// as 0. An empty bucket yields `DmResponse::neutral()`.
    pub fn select(&self, request_type: RequestType, random: impl FnOnce() -> f64) -> DmResponse {
        let responses = self.responses_for(request_type);
        if responses.is_empty() {
            return DmResponse::neutral();
        }

        let sample = random();
        let sample = if sample.is_nan() {
            0.0
        } else {
            sample.clamp(0.0, MAX_RANDOM)
        };
        let index = (sample * responses.len() as f64).floor() as usize;

        responses
            .get(index)
            .or_else(|| responses.first())
            .cloned()
            .unwrap_or_else(DmResponse::neutral)
    }
}
