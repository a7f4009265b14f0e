use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{chatdb::ChatExt, userdb::UserExt},
    dtos::{chatdtos::*, userdtos::FilterUserDto},
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn chat_handler() -> Router {
    Router::new()
        .route("/send", post(send_message))
        .route("/partners", get(get_chat_partners))
        .route("/:user_id", get(get_conversation))
}

pub async fn send_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<SendMessageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let receiver = app_state
        .db_client
        .get_user(Some(body.receiver_id), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Receiver not found"))?;

    let message = app_state
        .db_client
        .save_message(auth.user.id, receiver.id, body.content)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponseDto {
            status: "success".to_string(),
            message,
        }),
    ))
}

/// Symmetric view over the directed message log: both directions, oldest
/// first.
pub async fn get_conversation(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let messages = app_state
        .db_client
        .get_conversation(auth.user.id, user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ConversationResponseDto {
        status: "success".to_string(),
        messages,
    }))
}

pub async fn get_chat_partners(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let partner_ids = app_state
        .db_client
        .get_chat_partner_ids(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let mut partners = Vec::with_capacity(partner_ids.len());
    for partner_id in partner_ids {
        if let Some(user) = app_state
            .db_client
            .get_user(Some(partner_id), None)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
        {
            partners.push(FilterUserDto::filter_user(&user));
        }
    }

    Ok(Json(ChatPartnersResponseDto {
        status: "success".to_string(),
        partners,
    }))
}
