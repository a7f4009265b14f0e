use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "application_status", rename_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
    Hired,
}

impl ApplicationStatus {
    pub fn to_str(&self) -> &str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Hired => "hired",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Job {
    pub id: Uuid,
    pub client_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub is_open: bool,
    pub created_at: DateTime<Utc>,
}

/// One row per (job_id, worker_id) pair, enforced by a unique constraint.
/// client_id is a denormalized copy of jobs.client_id, set once at insert.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub worker_id: Uuid,
    pub client_id: Uuid,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}
