use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::jobdtos::*,
    error::HttpError,
    middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    service::{access::ensure_role, job_service::ApplyOutcome},
    AppState,
};

pub fn jobs_handler() -> Router {
    Router::new()
        // Role split on "/": clients post, workers browse. The service
        // gate enforces the posting role; find_jobs checks its own.
        .route("/", get(find_jobs).post(post_job))
        .route(
            "/mine",
            get(my_jobs).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Client])
            })),
        )
        .route(
            "/applications",
            get(view_applications).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Client])
            })),
        )
        .route(
            "/hired",
            get(hired_relationships).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Worker])
            })),
        )
        .route("/:job_id", get(get_job))
        .route(
            "/:job_id/apply",
            post(apply_to_job).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Worker])
            })),
        )
        .route(
            "/:job_id/hire/:worker_id",
            post(hire_worker).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Client])
            })),
        )
}

pub async fn post_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateJobDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let job = app_state
        .job_service
        .post_job(&auth.user, body)
        .await
        .map_err(HttpError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(JobResponseDto {
            status: "success".to_string(),
            job,
        }),
    ))
}

/// Open jobs for a worker, with the job ids they already applied to.
pub async fn find_jobs(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Query(query): Query<JobQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&auth.user, &[UserRole::Worker]).map_err(HttpError::from)?;

    let jobs = app_state
        .job_service
        .find_jobs(query.search.as_deref(), query.location.as_deref())
        .await
        .map_err(HttpError::from)?;

    let applied_job_ids = app_state
        .job_service
        .applied_job_ids(auth.user.id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(FindJobsResponseDto {
        status: "success".to_string(),
        jobs,
        applied_job_ids,
    }))
}

pub async fn my_jobs(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let jobs = app_state
        .job_service
        .jobs_for_client(auth.user.id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(JobListResponseDto {
        status: "success".to_string(),
        results: jobs.len(),
        jobs,
    }))
}

pub async fn get_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(_auth): Extension<JWTAuthMiddeware>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state
        .job_service
        .get_job(job_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(JobResponseDto {
        status: "success".to_string(),
        job,
    }))
}

pub async fn apply_to_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let outcome = app_state
        .job_service
        .apply_to_job(&auth.user, job_id)
        .await
        .map_err(HttpError::from)?;

    // The duplicate case is success shaped: "ALREADY", nothing mutated.
    let response = match outcome {
        ApplyOutcome::Created { application } => (
            StatusCode::CREATED,
            Json(json!({
                "status": "success",
                "message": "OK",
                "application": application,
            })),
        ),
        ApplyOutcome::AlreadyApplied => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "message": "ALREADY",
            })),
        ),
    };

    Ok(response)
}

pub async fn hire_worker(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path((job_id, worker_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, HttpError> {
    let result = app_state
        .job_service
        .hire_worker(&auth.user, worker_id, job_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(json!({
        "status": "success",
        "message": "Worker hired & notified.",
        "application": result.application,
        "job": result.job,
    })))
}

pub async fn view_applications(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let applications = app_state
        .job_service
        .applications_for_client(&auth.user)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApplicationListResponseDto {
        status: "success".to_string(),
        results: applications.len(),
        applications,
    }))
}

pub async fn hired_relationships(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let hired = app_state
        .job_service
        .hired_relationships(&auth.user)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(HiredRelationshipsResponseDto {
        status: "success".to_string(),
        hired,
    }))
}
