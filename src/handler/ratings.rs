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
    dtos::ratingdtos::*,
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn rating_handler() -> Router {
    Router::new()
        .route("/user/:user_id", get(get_user_ratings).post(submit_rating))
        .route("/user/:user_id/average", get(get_average_rating))
}

/// Any authenticated user may rate any other. Re-rating the same
/// (recipient, author, job) triple replaces the previous score.
pub async fn submit_rating(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<SubmitRatingDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let rating = app_state
        .rating_service
        .submit_rating(&auth.user, user_id, body)
        .await
        .map_err(HttpError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(RatingResponseDto {
            status: "success".to_string(),
            rating,
        }),
    ))
}

pub async fn get_user_ratings(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(_auth): Extension<JWTAuthMiddeware>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let ratings = app_state
        .rating_service
        .ratings_for_user(user_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(RatingListResponseDto {
        status: "success".to_string(),
        results: ratings.len(),
        ratings,
    }))
}

pub async fn get_average_rating(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(_auth): Extension<JWTAuthMiddeware>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let average = app_state
        .rating_service
        .average_rating(user_id)
        .await
        .map_err(HttpError::from)?;

    let count = app_state
        .rating_service
        .rating_count(user_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(AverageRatingResponseDto {
        status: "success".to_string(),
        average,
        count,
    }))
}
