use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row per (recipient, author, job_id) triple; re-submitting replaces
/// score and comment in place. job_id is nullable for ratings left outside
/// any job context.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Rating {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub author_id: Uuid,
    pub job_id: Option<Uuid>,
    pub score: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}
