use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    dtos::userdtos::RequestQueryDto,
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn notification_handler() -> Router {
    Router::new()
        .route("/", get(get_user_notifications))
        .route("/unread-count", get(get_unread_count))
        .route("/:id/read", put(mark_notification_read))
}

pub async fn get_user_notifications(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Query(pagination): Query<RequestQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let page = pagination.page.unwrap_or(1);
    let limit = pagination.limit.unwrap_or(20).min(100) as i64;
    let offset = (page as i64 - 1) * limit;

    let notifications = app_state
        .notification_service
        .list(auth.user.id, limit, offset)
        .await
        .map_err(HttpError::from)?;

    let unread_count = app_state
        .notification_service
        .unread_count(auth.user.id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(json!({
        "status": "success",
        "notifications": notifications,
        "unread_count": unread_count,
        "page": page,
        "limit": limit,
    })))
}

pub async fn get_unread_count(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let count = app_state
        .notification_service
        .unread_count(auth.user.id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(json!({
        "status": "success",
        "unread_count": count,
    })))
}

/// Owner-scoped read flip. A non-owner call matches nothing and still
/// reports success.
pub async fn mark_notification_read(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(notification_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .notification_service
        .mark_read(notification_id, auth.user.id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(json!({
        "status": "success",
        "message": "Notification marked as read",
    })))
}
