use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::journal::{commands, queries, EntryInput};
use crate::routes::ApiJson;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/journal-entries", get(list_entries).post(create_entry))
        .route(
            "/api/journal-entries/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
}

async fn list_entries(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let entries = queries::list_entries(&state.db, &owner).await?;
    Ok(Json(entries))
}

async fn get_entry(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let entry = queries::get_entry(&state.db, id, &owner)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(entry))
}

async fn create_entry(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
    ApiJson(input): ApiJson<EntryInput>,
) -> Result<impl IntoResponse, AppError> {
    let cancel = state.shutdown.child_token();
    let entry = commands::create_entry(&state.db, &owner, input, &cancel).await?;
    let location = format!("/api/journal-entries/{}", entry.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(entry)))
}

async fn update_entry(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
    Path(id): Path<i64>,
    ApiJson(input): ApiJson<EntryInput>,
) -> Result<impl IntoResponse, AppError> {
    let cancel = state.shutdown.child_token();
    let entry = commands::update_entry(&state.db, id, &owner, input, &cancel).await?;
    Ok(Json(entry))
}

async fn delete_entry(
    State(state): State<AppState>,
    AuthUser(owner): AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let cancel = state.shutdown.child_token();
    commands::delete_entry(&state.db, id, &owner, &cancel).await?;
    Ok(StatusCode::NO_CONTENT)
}
