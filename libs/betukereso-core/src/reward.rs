//! Sticker award rules.
//!
//! Threshold stickers are deterministic and paid out once per child. Interval
//! stickers past streak 10 are drawn with a probability that decays with the
//! size of the child's collection.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{ChildSettings, Sticker};

/// Collection size below which interval stickers are always awarded.
pub const DECAY_FREE_STICKERS: u32 = 20;
/// Probability lost per sticker owned beyond [`DECAY_FREE_STICKERS`].
pub const DECAY_PER_STICKER: f64 = 0.01;
/// Streak at which interval stickers start counting.
pub const BONUS_STREAK_BASE: u32 = 10;

/// Award probability for an interval candidate, in `[0, 1]`.
pub fn sticker_probability(total_stickers: u32) -> f64 {
    let beyond = total_stickers.saturating_sub(DECAY_FREE_STICKERS);
    (1.0 - DECAY_PER_STICKER * beyond as f64).clamp(0.0, 1.0)
}

/// Why a correct answer may earn a sticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "threshold", rename_all = "snake_case")]
pub enum AwardTrigger {
    /// Streak hit an unclaimed threshold.
    Threshold(u32),
    /// Streak hit a multiple of the bonus interval past [`BONUS_STREAK_BASE`].
    Interval,
}

impl AwardTrigger {
    pub fn probability(self, total_stickers: u32) -> f64 {
        match self {
            Self::Threshold(_) => 1.0,
            Self::Interval => sticker_probability(total_stickers),
        }
    }

    /// Sample once whether the candidate becomes a sticker.
    pub fn draw<R: Rng + ?Sized>(self, total_stickers: u32, rng: &mut R) -> bool {
        let p = self.probability(total_stickers);
        if p >= 1.0 {
            return true;
        }
        if p <= 0.0 {
            return false;
        }
        rng.gen_bool(p)
    }
}

/// Decide whether a streak value is an award candidate.
///
/// Callers only ask after a correct answer. Returns `None` when stickers are
/// disabled or the streak matches neither rule.
pub fn award_trigger(
    streak: u32,
    settings: &ChildSettings,
    claimed: &BTreeSet<u32>,
) -> Option<AwardTrigger> {
    if !settings.stickers_enabled || streak == 0 {
        return None;
    }
    if settings.streak_thresholds.contains(&streak) && !claimed.contains(&streak) {
        return Some(AwardTrigger::Threshold(streak));
    }
    let interval = settings.additional_sticker_interval;
    if streak >= BONUS_STREAK_BASE && interval > 0 && (streak - BONUS_STREAK_BASE) % interval == 0 {
        return Some(AwardTrigger::Interval);
    }
    None
}

/// Name and emoji shown for a sticker earned at a streak level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickerDesign {
    pub name: String,
    pub emoji: String,
    pub description: String,
}

impl StickerDesign {
    pub fn for_streak(streak: u32) -> Self {
        let (name, emoji) = match streak {
            3 => ("Arany Csillag".to_string(), "🌟"),
            5 => ("Szuper Olvasó".to_string(), "📚"),
            10 => ("Betű Mester".to_string(), "🏆"),
            15 => ("Király Olvasó".to_string(), "👑"),
            20 => ("Tökéletes Teljesítmény".to_string(), "🎯"),
            n => (format!("{n} Sorozat Bajnok!"), "🎉"),
        };
        Self {
            name,
            emoji: emoji.to_string(),
            description: format!("{streak} helyes válasz egymás után!"),
        }
    }
}

/// Mint a new sticker for `child_id` at the given streak.
pub fn make_sticker(child_id: Uuid, streak: u32, now: DateTime<Utc>) -> Sticker {
    let design = StickerDesign::for_streak(streak);
    Sticker {
        id: Uuid::new_v4(),
        child_id,
        streak_level: streak,
        name: design.name,
        emoji: design.emoji,
        description: Some(design.description),
        earned_at: now,
    }
}
