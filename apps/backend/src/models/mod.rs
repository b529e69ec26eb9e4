//! Database models and API types

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from betukereso-core
pub use betukereso_core::{
    CaseStyle, Child, ChildSettings, FindLetterRound, GameMode, Grapheme, GraphemeInfo,
    GraphemeProgress, LetterPrompt, PairBoard, ProgressUpdate, SettingsUpdate, Sticker, Tool,
    TraceScore,
};

// === Database Entity Types ===

/// Child profile stored in PostgreSQL
#[derive(Debug, Clone, FromRow)]
pub struct DbChild {
    pub id: Uuid,
    pub name: String,
    pub streak: i32,
    pub total_stickers: i32,
    pub progress: Json<BTreeMap<Grapheme, GraphemeProgress>>,
    pub settings: Json<ChildSettings>,
    pub claimed_thresholds: Vec<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbChild {
    /// Convert to the engine's child type
    pub fn into_child(self) -> Child {
        Child {
            id: self.id,
            name: self.name,
            streak: self.streak.max(0) as u32,
            total_stickers: self.total_stickers.max(0) as u32,
            progress: self.progress.0,
            settings: self.settings.0,
            claimed_thresholds: self
                .claimed_thresholds
                .into_iter()
                .filter_map(|t| u32::try_from(t).ok())
                .collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Create from the engine's child type
    pub fn from_child(child: &Child) -> Self {
        Self {
            id: child.id,
            name: child.name.clone(),
            streak: to_db_int(child.streak),
            total_stickers: to_db_int(child.total_stickers),
            progress: Json(child.progress.clone()),
            settings: Json(child.settings.clone()),
            claimed_thresholds: child.claimed_thresholds.iter().map(|t| to_db_int(*t)).collect(),
            created_at: child.created_at,
            updated_at: child.updated_at,
        }
    }
}

/// Sticker stored in PostgreSQL
#[derive(Debug, Clone, FromRow)]
pub struct DbSticker {
    pub id: Uuid,
    pub child_id: Uuid,
    pub streak_level: i32,
    pub name: String,
    pub emoji: String,
    pub description: Option<String>,
    pub earned_at: DateTime<Utc>,
}

impl DbSticker {
    pub fn into_sticker(self) -> Sticker {
        Sticker {
            id: self.id,
            child_id: self.child_id,
            streak_level: self.streak_level.max(0) as u32,
            name: self.name,
            emoji: self.emoji,
            description: self.description,
            earned_at: self.earned_at,
        }
    }
}

/// One recorded answer, kept for auditing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SessionRecord {
    pub id: Uuid,
    pub child_id: Uuid,
    pub game_mode: String,
    pub grapheme: String,
    pub is_correct: bool,
    pub response_time_ms: Option<i64>,
    pub recorded_at: DateTime<Utc>,
}

fn to_db_int(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

// === API Request/Response Types ===

/// Request to create a child profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChildRequest {
    pub name: String,
}

/// Request to update a child profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateChildRequest {
    pub name: Option<String>,
}

/// Generic success response
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Answer submitted after a round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordProgressRequest {
    pub game_mode: GameMode,
    pub grapheme: String,
    pub is_correct: bool,
    #[serde(default, alias = "response_time")]
    pub response_time_ms: Option<i64>,
}

/// Request for a new round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRoundRequest {
    pub mode: GameMode,
}

/// Generated round, tagged with its mode
#[derive(Debug, Serialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum RoundResponse {
    FindLetter(FindLetterRound),
    TraceLetter(LetterPrompt),
    MatchCase(PairBoard),
    ShowMark(LetterPrompt),
}

/// Query parameters for random graphemes
#[derive(Debug, Clone, Deserialize)]
pub struct RandomGraphemesQuery {
    #[serde(default = "default_random_count")]
    pub count: usize,
    #[serde(default)]
    pub include_foreign: bool,
    #[serde(default = "default_true")]
    pub trouble_bias: bool,
}

fn default_random_count() -> usize {
    9
}

fn default_true() -> bool {
    true
}

/// Random grapheme draw
#[derive(Debug, Serialize, Deserialize)]
pub struct RandomGraphemesResponse {
    pub graphemes: Vec<Grapheme>,
}

/// Audio metadata for one grapheme; recordings are served statically
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioResponse {
    pub grapheme: Grapheme,
    pub audio_url: String,
    pub status: String,
}

/// Round target as the client displayed it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetRequest {
    pub grapheme: Grapheme,
    pub style: CaseStyle,
}

/// Mode-specific answer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerPayload {
    Click { display: String },
    Pair { upper: String, lower: String },
    Verdict { correct: bool },
}

/// Request to evaluate a find-letter, match-case or show-mark answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub mode: GameMode,
    pub target: TargetRequest,
    pub answer: AnswerPayload,
}

/// Evaluation verdict
#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluateResponse {
    pub correct: bool,
}

/// Pointer sample in canvas coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

/// One continuous pointer stroke
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrokeRequest {
    #[serde(default)]
    pub tool: Tool,
    pub points: Vec<CanvasPoint>,
}

/// Reference glyph (base64 PNG) plus the strokes drawn over it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEvaluateRequest {
    pub reference_png: String,
    #[serde(default)]
    pub strokes: Vec<StrokeRequest>,
}
