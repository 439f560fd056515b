use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    middleware::teacher::TeacherAuth,
    models::announcement::{Announcement, AnnouncementParams},
    AppState,
};

/// GET /announcements — public, only announcements inside their active window.
pub async fn list_active(
    State(state): State<AppState>,
) -> Result<Json<Vec<Announcement>>, AppError> {
    state.announcements.list_active().await.map(Json)
}

/// GET /announcements/all — teachers only, expired and scheduled included.
pub async fn list_all(
    State(state): State<AppState>,
    TeacherAuth(teacher): TeacherAuth,
) -> Result<Json<Vec<Announcement>>, AppError> {
    state.announcements.list_all(&teacher).await.map(Json)
}

/// POST /announcements?message=..&expiration_date=..[&start_date=..]
pub async fn create_announcement(
    State(state): State<AppState>,
    TeacherAuth(teacher): TeacherAuth,
    Query(params): Query<AnnouncementParams>,
) -> Result<Json<Announcement>, AppError> {
    state.announcements.create(&teacher, params).await.map(Json)
}

/// PUT /announcements/{id} — full replace; omitting `start_date` clears it.
pub async fn update_announcement(
    State(state): State<AppState>,
    TeacherAuth(teacher): TeacherAuth,
    Path(announcement_id): Path<String>,
    Query(params): Query<AnnouncementParams>,
) -> Result<Json<Announcement>, AppError> {
    state
        .announcements
        .update(&teacher, &announcement_id, params)
        .await
        .map(Json)
}

pub async fn delete_announcement(
    State(state): State<AppState>,
    TeacherAuth(teacher): TeacherAuth,
    Path(announcement_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    state
        .announcements
        .delete(&teacher, &announcement_id)
        .await?;
    Ok(Json(json!({ "message": "Announcement deleted successfully" })))
}
