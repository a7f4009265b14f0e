use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::jobdb::HiredRelationship,
    models::jobmodel::{Application, Job},
};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateJobDto {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JobQueryDto {
    pub search: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JobResponseDto {
    pub status: String,
    pub job: Job,
}

#[derive(Debug, Serialize)]
pub struct JobListResponseDto {
    pub status: String,
    pub jobs: Vec<Job>,
    pub results: usize,
}

/// Open-jobs listing for a worker, carrying the ids of jobs they already
/// applied to so the client UI can disable the button.
#[derive(Debug, Serialize)]
pub struct FindJobsResponseDto {
    pub status: String,
    pub jobs: Vec<Job>,
    pub applied_job_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ApplicationListResponseDto {
    pub status: String,
    pub applications: Vec<Application>,
    pub results: usize,
}

#[derive(Debug, Serialize)]
pub struct HiredRelationshipsResponseDto {
    pub status: String,
    pub hired: Vec<HiredRelationship>,
}
