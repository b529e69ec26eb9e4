//! Recording answers against a stored child

use betukereso_core::{record_answer, AnswerOutcome, Catalog};
use chrono::Utc;
use uuid::Uuid;

use crate::db::Store;
use crate::error::{ApiError, Result};
use crate::models::*;

/// Load the child, apply the answer and commit the outcome atomically.
///
/// A failed commit leaves the stored child, stickers and session records
/// exactly as they were.
pub async fn record_progress(
    store: &dyn Store,
    child_id: Uuid,
    request: &RecordProgressRequest,
) -> Result<ProgressUpdate> {
    let child = store
        .get_child(child_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Child {}", child_id)))?;

    let now = Utc::now();
    let grapheme = Grapheme::from(request.grapheme.trim());
    let AnswerOutcome { child, update, .. } = {
        let mut rng = rand::thread_rng();
        record_answer(
            &Catalog::hungarian(),
            &child,
            request.game_mode,
            &grapheme,
            request.is_correct,
            &mut rng,
            now,
        )?
    };

    let record = SessionRecord {
        id: Uuid::new_v4(),
        child_id,
        game_mode: request.game_mode.as_str().to_string(),
        grapheme: grapheme.to_string(),
        is_correct: request.is_correct,
        response_time_ms: request.response_time_ms,
        recorded_at: now,
    };

    store
        .commit_answer(&child, update.sticker_earned.as_ref(), &record)
        .await?;

    if let Some(sticker) = &update.sticker_earned {
        tracing::info!(
            child_id = %child_id,
            streak = sticker.streak_level,
            total = update.total_stickers,
            "sticker persisted"
        );
    }

    Ok(update)
}
