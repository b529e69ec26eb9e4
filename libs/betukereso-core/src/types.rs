//! Core types for the practice engine.

use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, Result};

/// A single letter or accepted multi-letter unit of the alphabet ("a", "cs", "dzs").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grapheme(String);

impl Grapheme {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Grapheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Grapheme {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Grapheme {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for Grapheme {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Grapheme {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Mini-game the answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    FindLetter,
    TraceLetter,
    MatchCase,
    ShowMark,
}

impl GameMode {
    /// Get the mode name as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FindLetter => "find-letter",
            Self::TraceLetter => "trace-letter",
            Self::MatchCase => "match-case",
            Self::ShowMark => "show-mark",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "find-letter" => Some(Self::FindLetter),
            "trace-letter" => Some(Self::TraceLetter),
            "match-case" => Some(Self::MatchCase),
            "show-mark" => Some(Self::ShowMark),
            _ => None,
        }
    }

    /// Whether a wrong answer keeps the same round open for another try.
    /// Trace-letter and show-mark move on either way.
    pub fn retries_until_correct(self) -> bool {
        matches!(self, Self::FindLetter | Self::MatchCase)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty level; drives the find-letter grid size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Medium
    }
}

impl Difficulty {
    /// Number of cells in a find-letter grid.
    pub fn grid_size(self) -> usize {
        match self {
            Self::Easy => 6,
            Self::Medium => 9,
            Self::Hard => 12,
        }
    }
}

/// Letter case setting. `Mixed` rolls one of the concrete cases per occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterCase {
    Lowercase,
    Uppercase,
    Titlecase,
    Mixed,
}

impl Default for LetterCase {
    fn default() -> Self {
        Self::Mixed
    }
}

pub const MIN_LETTERS_PER_SESSION: u32 = 3;
pub const MAX_LETTERS_PER_SESSION: u32 = 15;
pub const MAX_STICKER_INTERVAL: u32 = 50;
pub const MAX_NAME_CHARS: usize = 50;

/// Per-child session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChildSettings {
    pub letters_per_session: u32,
    pub letter_case: LetterCase,
    pub include_foreign_letters: bool,
    pub difficulty: Difficulty,
    pub streak_thresholds: Vec<u32>,
    pub additional_sticker_interval: u32,
    pub stickers_enabled: bool,
    pub sound_enabled: bool,
    pub high_contrast: bool,
}

impl Default for ChildSettings {
    fn default() -> Self {
        Self {
            letters_per_session: 9,
            letter_case: LetterCase::default(),
            include_foreign_letters: false,
            difficulty: Difficulty::default(),
            streak_thresholds: vec![3, 5, 10],
            additional_sticker_interval: 5,
            stickers_enabled: true,
            sound_enabled: true,
            high_contrast: false,
        }
    }
}

impl ChildSettings {
    /// Check value ranges and normalize the threshold list (ascending, unique).
    pub fn validated(mut self) -> Result<Self> {
        if !(MIN_LETTERS_PER_SESSION..=MAX_LETTERS_PER_SESSION).contains(&self.letters_per_session)
        {
            return Err(EngineError::InvalidSettings(format!(
                "letters_per_session must be between {} and {}",
                MIN_LETTERS_PER_SESSION, MAX_LETTERS_PER_SESSION
            )));
        }
        if self.additional_sticker_interval > MAX_STICKER_INTERVAL {
            return Err(EngineError::InvalidSettings(format!(
                "additional_sticker_interval must be at most {}",
                MAX_STICKER_INTERVAL
            )));
        }
        if self.streak_thresholds.contains(&0) {
            return Err(EngineError::InvalidSettings(
                "streak thresholds must be positive".to_string(),
            ));
        }
        self.streak_thresholds.sort_unstable();
        self.streak_thresholds.dedup();
        Ok(self)
    }
}

/// Partial settings update (only provided fields change).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letters_per_session: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_case: Option<LetterCase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_foreign_letters: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak_thresholds: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_sticker_interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stickers_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_contrast: Option<bool>,
}

impl SettingsUpdate {
    /// Apply the update on top of `current`. Nothing changes if validation fails.
    pub fn apply(&self, current: &ChildSettings) -> Result<ChildSettings> {
        let mut next = current.clone();
        if let Some(value) = self.letters_per_session {
            next.letters_per_session = value;
        }
        if let Some(value) = self.letter_case {
            next.letter_case = value;
        }
        if let Some(value) = self.include_foreign_letters {
            next.include_foreign_letters = value;
        }
        if let Some(value) = self.difficulty {
            next.difficulty = value;
        }
        if let Some(value) = &self.streak_thresholds {
            next.streak_thresholds = value.clone();
        }
        if let Some(value) = self.additional_sticker_interval {
            next.additional_sticker_interval = value;
        }
        if let Some(value) = self.stickers_enabled {
            next.stickers_enabled = value;
        }
        if let Some(value) = self.sound_enabled {
            next.sound_enabled = value;
        }
        if let Some(value) = self.high_contrast {
            next.high_contrast = value;
        }
        next.validated()
    }
}

/// Per-grapheme practice counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphemeProgress {
    pub attempts: u32,
    pub correct: u32,
    pub stars: u8,
}

impl GraphemeProgress {
    /// Count an answer. Stars are only recomputed on a correct answer.
    pub fn record(&mut self, is_correct: bool) {
        self.attempts += 1;
        if is_correct {
            self.correct += 1;
            self.stars = stars_for(self.correct, self.attempts);
        }
    }

    /// Fraction of correct answers, 0.0 when never attempted.
    pub fn accuracy(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        self.correct as f64 / self.attempts as f64
    }
}

/// 0-3 stars: below 25% none, 75% and above three.
fn stars_for(correct: u32, attempts: u32) -> u8 {
    if attempts == 0 {
        return 0;
    }
    ((correct * 4) / attempts).min(3) as u8
}

/// A child profile with its learning state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    pub id: Uuid,
    pub name: String,
    pub streak: u32,
    pub total_stickers: u32,
    pub progress: BTreeMap<Grapheme, GraphemeProgress>,
    pub settings: ChildSettings,
    /// Streak thresholds that already paid out a sticker.
    #[serde(default)]
    pub claimed_thresholds: BTreeSet<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Child {
    /// Create a child with default settings and empty progress.
    pub fn new(name: &str, now: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: validate_name(name)?,
            streak: 0,
            total_stickers: 0,
            progress: BTreeMap::new(),
            settings: ChildSettings::default(),
            claimed_thresholds: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn rename(&mut self, name: &str, now: DateTime<Utc>) -> Result<()> {
        self.name = validate_name(name)?;
        self.updated_at = now;
        Ok(())
    }

    /// Progress for a grapheme (zeroed if never practised).
    pub fn progress_for(&self, grapheme: &str) -> GraphemeProgress {
        self.progress.get(grapheme).copied().unwrap_or_default()
    }
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    let len = trimmed.chars().count();
    if len == 0 || len > MAX_NAME_CHARS {
        return Err(EngineError::InvalidName(format!(
            "name must be 1 to {} characters",
            MAX_NAME_CHARS
        )));
    }
    Ok(trimmed.to_string())
}

/// Earned reward. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sticker {
    pub id: Uuid,
    pub child_id: Uuid,
    pub streak_level: u32,
    pub name: String,
    pub emoji: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub earned_at: DateTime<Utc>,
}

/// Result of recording one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub new_streak: u32,
    pub new_stars: u8,
    pub sticker_earned: Option<Sticker>,
    pub total_stickers: u32,
}
