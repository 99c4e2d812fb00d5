//! Normalized Dungeon Master response
//!
//! Every response shown to the player, whether it came from a provider or the
//! fallback catalog, goes through this type. Construction enforces:
//!
//! - `dialogue` is non-empty after trimming (stored trimmed)
//! - `difficulty_adjustment` is finite and clamped to `[-1, 1]`
//! - `hint_content` exists only together with a `hint_type` and is non-empty

use serde::Serialize;

use crate::error::DomainError;
use crate::types::{DmMood, HintType};

/// Lower bound of the difficulty nudge
pub const MIN_DIFFICULTY_ADJUSTMENT: f64 = -1.0;
/// Upper bound of the difficulty nudge
pub const MAX_DIFFICULTY_ADJUSTMENT: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DmResponse {
    dialogue: String,
    mood: DmMood,
    #[serde(skip_serializing_if = "Option::is_none")]
    difficulty_adjustment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint_type: Option<HintType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint_content: Option<String>,
}

impl DmResponse {
    /// Create a response with just dialogue and mood.
    pub fn new(dialogue: impl AsRef<str>, mood: DmMood) -> Result<Self, DomainError> {
        let dialogue = dialogue.as_ref().trim();
        if dialogue.is_empty() {
            return Err(DomainError::validation("dialogue cannot be empty"));
        }
        Ok(Self {
            dialogue: dialogue.to_string(),
            mood,
            difficulty_adjustment: None,
            hint_type: None,
            hint_content: None,
        })
    }

    /// Last-resort line used when nothing else is available.
    pub fn neutral() -> Self {
        Self {
            dialogue: "The dungeon waits in silence. Choose your next tile wisely.".to_string(),
            mood: DmMood::Curious,
            difficulty_adjustment: None,
            hint_type: None,
            hint_content: None,
        }
    }

    /// Attach a difficulty nudge, clamped to `[-1, 1]`.
    pub fn with_difficulty_adjustment(mut self, value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::validation(
                "difficultyAdjustment must be a finite number",
            ));
        }
        self.difficulty_adjustment =
            Some(value.clamp(MIN_DIFFICULTY_ADJUSTMENT, MAX_DIFFICULTY_ADJUSTMENT));
        Ok(self)
    }

    /// Attach a hint category with optional content.
    ///
    /// Blank content is dropped, leaving only the category.
    pub fn with_hint(mut self, hint_type: HintType, content: Option<&str>) -> Self {
        self.hint_type = Some(hint_type);
        self.hint_content = content
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        self
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn dialogue(&self) -> &str {
        &self.dialogue
    }

    pub fn mood(&self) -> DmMood {
        self.mood
    }

    pub fn difficulty_adjustment(&self) -> Option<f64> {
        self.difficulty_adjustment
    }

    pub fn hint_type(&self) -> Option<HintType> {
        self.hint_type
    }

    pub fn hint_content(&self) -> Option<&str> {
        self.hint_content.as_deref()
    }
}
