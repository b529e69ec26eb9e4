//! Child profile, settings, progress and sticker endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use betukereso_core::Catalog;
use chrono::Utc;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::services::progress::record_progress;
use crate::AppState;

async fn load_child(state: &AppState, child_id: Uuid) -> Result<Child> {
    state
        .store
        .get_child(child_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Child {}", child_id)))
}

/// GET /api/children
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Child>>> {
    Ok(Json(state.store.list_children().await?))
}

/// POST /api/children
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateChildRequest>,
) -> Result<(StatusCode, Json<Child>)> {
    let child = Child::new(&request.name, Utc::now())?;
    state.store.insert_child(&child).await?;

    tracing::info!(child_id = %child.id, "child created");
    Ok((StatusCode::CREATED, Json(child)))
}

/// GET /api/children/:child_id
pub async fn get(
    State(state): State<AppState>,
    Path(child_id): Path<Uuid>,
) -> Result<Json<Child>> {
    Ok(Json(load_child(&state, child_id).await?))
}

/// PUT /api/children/:child_id
pub async fn update(
    State(state): State<AppState>,
    Path(child_id): Path<Uuid>,
    Json(request): Json<UpdateChildRequest>,
) -> Result<Json<Child>> {
    let mut child = load_child(&state, child_id).await?;

    if let Some(name) = &request.name {
        child.rename(name, Utc::now())?;
        if !state.store.update_child(&child).await? {
            return Err(ApiError::NotFound(format!("Child {}", child_id)));
        }
    }

    Ok(Json(child))
}

/// DELETE /api/children/:child_id
pub async fn delete(
    State(state): State<AppState>,
    Path(child_id): Path<Uuid>,
) -> Result<Json<SuccessResponse>> {
    if !state.store.delete_child(child_id).await? {
        return Err(ApiError::NotFound(format!("Child {}", child_id)));
    }

    tracing::info!(child_id = %child_id, "child deleted");
    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/children/:child_id/settings
pub async fn get_settings(
    State(state): State<AppState>,
    Path(child_id): Path<Uuid>,
) -> Result<Json<ChildSettings>> {
    Ok(Json(load_child(&state, child_id).await?.settings))
}

/// PUT /api/children/:child_id/settings
pub async fn update_settings(
    State(state): State<AppState>,
    Path(child_id): Path<Uuid>,
    Json(request): Json<SettingsUpdate>,
) -> Result<Json<ChildSettings>> {
    let mut child = load_child(&state, child_id).await?;

    child.settings = request.apply(&child.settings)?;
    child.updated_at = Utc::now();

    if !state.store.update_child(&child).await? {
        return Err(ApiError::NotFound(format!("Child {}", child_id)));
    }

    Ok(Json(child.settings))
}

/// POST /api/children/:child_id/progress
pub async fn progress(
    State(state): State<AppState>,
    Path(child_id): Path<Uuid>,
    Json(request): Json<RecordProgressRequest>,
) -> Result<Json<ProgressUpdate>> {
    let update = record_progress(state.store.as_ref(), child_id, &request).await?;
    Ok(Json(update))
}

/// GET /api/children/:child_id/stickers
pub async fn stickers(
    State(state): State<AppState>,
    Path(child_id): Path<Uuid>,
) -> Result<Json<Vec<Sticker>>> {
    load_child(&state, child_id).await?;
    Ok(Json(state.store.list_stickers(child_id).await?))
}

/// POST /api/children/:child_id/rounds
pub async fn new_round(
    State(state): State<AppState>,
    Path(child_id): Path<Uuid>,
    Json(request): Json<NewRoundRequest>,
) -> Result<Json<RoundResponse>> {
    let child = load_child(&state, child_id).await?;
    Ok(Json(generate_round(request.mode, &child.settings)?))
}

fn generate_round(mode: GameMode, settings: &ChildSettings) -> Result<RoundResponse> {
    let catalog = Catalog::hungarian();
    let mut rng = rand::thread_rng();

    let round = match mode {
        GameMode::FindLetter => {
            RoundResponse::FindLetter(FindLetterRound::generate(&catalog, settings, &mut rng)?)
        }
        GameMode::MatchCase => {
            RoundResponse::MatchCase(PairBoard::generate(&catalog, settings, &mut rng)?)
        }
        GameMode::TraceLetter => {
            RoundResponse::TraceLetter(LetterPrompt::generate(&catalog, settings, &mut rng)?)
        }
        GameMode::ShowMark => {
            RoundResponse::ShowMark(LetterPrompt::generate(&catalog, settings, &mut rng)?)
        }
    };
    Ok(round)
}
