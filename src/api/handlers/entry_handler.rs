use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{debug, info};

use crate::{
    api::{app_state::AppState, dto::entry_dto::*},
    error::AppError,
    security::validation::ValidatedJson,
    services::journal::Pagination,
};

pub async fn create_entry(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateEntryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let entry = state.journal_service.create(&request.content).await?;
    info!("Created entry {} ({})", entry.id, entry.mood);

    state.metrics.record_entry_created();
    Ok((StatusCode::CREATED, Json(EntryResponse::from(entry))))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Query(params): Query<ListEntriesParams>,
) -> Result<impl IntoResponse, AppError> {
    debug!(
        "Listing entries: page={:?}, page_size={:?}",
        params.page, params.page_size
    );

    let page = params.page.unwrap_or(1);
    let page_size = params
        .page_size
        .unwrap_or(state.journal_config.default_page_size);

    let entries = state
        .journal_service
        .list(Pagination::new(page, page_size))
        .await?;
    let total = state.journal_service.count().await?;

    Ok(Json(EntryListResponse {
        entries: entries.into_iter().map(EntryResponse::from).collect(),
        total,
        page,
        page_size,
    }))
}

pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Getting entry: {}", id);

    let entry = state
        .journal_service
        .get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Entry not found: {}", id)))?;

    Ok(Json(EntryResponse::from(entry)))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.journal_service.delete(&id).await?;
    info!("Deleted entry {}", id);

    state.metrics.record_entry_deleted();
    Ok(Json(DeleteEntryResponse {
        id,
        message: "Entry deleted".to_string(),
    }))
}
