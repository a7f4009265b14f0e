// db/jobdb.rs
use async_trait::async_trait;
use sqlx::PgConnection;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::jobmodel::{Application, ApplicationStatus, Job};

const JOB_COLUMNS: &str = "id, client_id, title, description, location, is_open, created_at";
const APPLICATION_COLUMNS: &str = "id, job_id, worker_id, client_id, status, created_at";

#[async_trait]
pub trait JobExt {
    async fn get_job(&self, job_id: Uuid) -> Result<Option<Job>, sqlx::Error>;

    /// Open jobs, optionally narrowed by a title/description search term
    /// and a location substring.
    async fn get_open_jobs(
        &self,
        search: Option<&str>,
        location: Option<&str>,
    ) -> Result<Vec<Job>, sqlx::Error>;

    async fn get_jobs_by_client(&self, client_id: Uuid) -> Result<Vec<Job>, sqlx::Error>;

    async fn get_applications_by_client(
        &self,
        client_id: Uuid,
    ) -> Result<Vec<Application>, sqlx::Error>;

    async fn get_applied_job_ids(&self, worker_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error>;

    async fn get_hired_relationships(
        &self,
        worker_id: Uuid,
    ) -> Result<Vec<HiredRelationship>, sqlx::Error>;

    /// True iff any job owned by `client_id` has an application with
    /// `worker_id` at status hired. Deliberately client-scoped, not
    /// job-scoped: one hire unlocks the pair for every job.
    async fn is_hired(&self, worker_id: Uuid, client_id: Uuid) -> Result<bool, sqlx::Error>;
}

#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct HiredRelationship {
    pub client_id: Uuid,
    pub client_name: String,
    pub job_id: Uuid,
    pub job_title: String,
}

#[async_trait]
impl JobExt for DBClient {
    async fn get_job(&self, job_id: Uuid) -> Result<Option<Job>, sqlx::Error> {
        sqlx::query_as::<_, Job>(&format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS))
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_open_jobs(
        &self,
        search: Option<&str>,
        location: Option<&str>,
    ) -> Result<Vec<Job>, sqlx::Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            SELECT {}
            FROM jobs
            WHERE is_open = TRUE
              AND ($1::text IS NULL
                   OR title ILIKE '%' || $1 || '%'
                   OR description ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR location ILIKE '%' || $2 || '%')
            ORDER BY created_at DESC
            "#,
            JOB_COLUMNS
        ))
        .bind(search)
        .bind(location)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_jobs_by_client(&self, client_id: Uuid) -> Result<Vec<Job>, sqlx::Error> {
        sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs WHERE client_id = $1 ORDER BY created_at DESC",
            JOB_COLUMNS
        ))
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_applications_by_client(
        &self,
        client_id: Uuid,
    ) -> Result<Vec<Application>, sqlx::Error> {
        sqlx::query_as::<_, Application>(&format!(
            "SELECT {} FROM applications WHERE client_id = $1 ORDER BY created_at DESC",
            APPLICATION_COLUMNS
        ))
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_applied_job_ids(&self, worker_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
        sqlx::query_scalar::<_, Uuid>("SELECT job_id FROM applications WHERE worker_id = $1")
            .bind(worker_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_hired_relationships(
        &self,
        worker_id: Uuid,
    ) -> Result<Vec<HiredRelationship>, sqlx::Error> {
        sqlx::query_as::<_, HiredRelationship>(
            r#"
            SELECT u.id AS client_id, u.name AS client_name,
                   j.id AS job_id, j.title AS job_title
            FROM applications a
            JOIN jobs j ON j.id = a.job_id
            JOIN users u ON u.id = j.client_id
            WHERE a.worker_id = $1 AND a.status = 'hired'::application_status
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(worker_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn is_hired(&self, worker_id: Uuid, client_id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM applications a
                JOIN jobs j ON j.id = a.job_id
                WHERE a.worker_id = $1
                  AND j.client_id = $2
                  AND a.status = 'hired'::application_status
            )
            "#,
        )
        .bind(worker_id)
        .bind(client_id)
        .fetch_one(&self.pool)
        .await
    }
}

// Transaction-scoped primitives. The apply/hire state machine runs its
// lookup and all dependent writes against one connection so that racing
// calls against the same (job, worker) pair serialize on the job row.

pub async fn insert_job(
    conn: &mut PgConnection,
    client_id: Uuid,
    title: &str,
    description: &str,
    location: Option<&str>,
) -> Result<Job, sqlx::Error> {
    sqlx::query_as::<_, Job>(&format!(
        r#"
        INSERT INTO jobs (client_id, title, description, location)
        VALUES ($1, $2, $3, $4)
        RETURNING {}
        "#,
        JOB_COLUMNS
    ))
    .bind(client_id)
    .bind(title)
    .bind(description)
    .bind(location)
    .fetch_one(conn)
    .await
}

pub async fn get_job_for_update(
    conn: &mut PgConnection,
    job_id: Uuid,
) -> Result<Option<Job>, sqlx::Error> {
    sqlx::query_as::<_, Job>(&format!(
        "SELECT {} FROM jobs WHERE id = $1 FOR UPDATE",
        JOB_COLUMNS
    ))
    .bind(job_id)
    .fetch_optional(conn)
    .await
}

pub async fn get_application_in_tx(
    conn: &mut PgConnection,
    job_id: Uuid,
    worker_id: Uuid,
) -> Result<Option<Application>, sqlx::Error> {
    sqlx::query_as::<_, Application>(&format!(
        "SELECT {} FROM applications WHERE job_id = $1 AND worker_id = $2 FOR UPDATE",
        APPLICATION_COLUMNS
    ))
    .bind(job_id)
    .bind(worker_id)
    .fetch_optional(conn)
    .await
}

pub async fn insert_application(
    conn: &mut PgConnection,
    job_id: Uuid,
    worker_id: Uuid,
    client_id: Uuid,
    status: ApplicationStatus,
) -> Result<Application, sqlx::Error> {
    sqlx::query_as::<_, Application>(&format!(
        r#"
        INSERT INTO applications (job_id, worker_id, client_id, status)
        VALUES ($1, $2, $3, $4)
        RETURNING {}
        "#,
        APPLICATION_COLUMNS
    ))
    .bind(job_id)
    .bind(worker_id)
    .bind(client_id)
    .bind(status)
    .fetch_one(conn)
    .await
}

pub async fn set_application_status(
    conn: &mut PgConnection,
    application_id: Uuid,
    status: ApplicationStatus,
) -> Result<Application, sqlx::Error> {
    sqlx::query_as::<_, Application>(&format!(
        r#"
        UPDATE applications
        SET status = $2
        WHERE id = $1
        RETURNING {}
        "#,
        APPLICATION_COLUMNS
    ))
    .bind(application_id)
    .bind(status)
    .fetch_one(conn)
    .await
}

pub async fn close_job(conn: &mut PgConnection, job_id: Uuid) -> Result<Job, sqlx::Error> {
    sqlx::query_as::<_, Job>(&format!(
        r#"
        UPDATE jobs
        SET is_open = FALSE
        WHERE id = $1
        RETURNING {}
        "#,
        JOB_COLUMNS
    ))
    .bind(job_id)
    .fetch_one(conn)
    .await
}
