//! Catalog and answer evaluation endpoints

use axum::{
    extract::{Path, Query},
    Json,
};
use betukereso_core::{evaluate, select_round, AnswerInput, Catalog, DisplayLetter, PoolConfig};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::services::trace::score_trace;

/// Bounds for `count` on the random draw.
const MIN_RANDOM_COUNT: usize = 1;
const MAX_RANDOM_COUNT: usize = 20;

/// GET /api/game/graphemes
pub async fn graphemes() -> Json<Vec<GraphemeInfo>> {
    Json(Catalog::hungarian().info(false))
}

/// GET /api/game/graphemes/random
pub async fn random_graphemes(
    Query(query): Query<RandomGraphemesQuery>,
) -> Result<Json<RandomGraphemesResponse>> {
    if !(MIN_RANDOM_COUNT..=MAX_RANDOM_COUNT).contains(&query.count) {
        return Err(ApiError::BadRequest(format!(
            "count must be between {} and {}",
            MIN_RANDOM_COUNT, MAX_RANDOM_COUNT
        )));
    }

    let config = PoolConfig {
        include_foreign: query.include_foreign,
        bias_trouble: query.trouble_bias,
    };
    let graphemes = select_round(
        &Catalog::hungarian(),
        config,
        query.count,
        &mut rand::thread_rng(),
    )?;

    Ok(Json(RandomGraphemesResponse { graphemes }))
}

/// GET /api/audio/:grapheme
pub async fn audio(Path(grapheme): Path<String>) -> Result<Json<AudioResponse>> {
    if !Catalog::hungarian().contains(&grapheme) {
        return Err(ApiError::NotFound(format!("Grapheme {}", grapheme)));
    }
    Ok(Json(AudioResponse {
        audio_url: format!("/static/audio/{}.mp3", grapheme),
        grapheme: Grapheme::from(grapheme),
        status: "placeholder".to_string(),
    }))
}

/// POST /api/game/evaluate
pub async fn evaluate_answer(Json(request): Json<EvaluateRequest>) -> Result<Json<EvaluateResponse>> {
    let target = DisplayLetter::new(request.target.grapheme, request.target.style);
    let input = match &request.answer {
        AnswerPayload::Click { display } => AnswerInput::Click { display },
        AnswerPayload::Pair { upper, lower } => AnswerInput::Pair { upper, lower },
        AnswerPayload::Verdict { correct } => AnswerInput::Verdict(*correct),
    };

    let correct = evaluate(request.mode, &target, input)?;
    Ok(Json(EvaluateResponse { correct }))
}

/// POST /api/game/evaluate/trace
pub async fn evaluate_trace(Json(request): Json<TraceEvaluateRequest>) -> Result<Json<TraceScore>> {
    Ok(Json(score_trace(&request)?))
}
