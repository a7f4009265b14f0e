// service/job_service.rs
//
// The hire/application state machine. States per (job, worker) pair:
// unapplied -> applied -> hired, with hired terminal. Every multi-step
// operation runs lookup and all dependent writes in one transaction,
// taking the job row lock first so racing calls against the same pair
// serialize; the UNIQUE (job_id, worker_id) constraint backstops the
// read-then-write upsert.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::{
        db::DBClient,
        jobdb::{
            close_job, get_application_in_tx, get_job_for_update, insert_application, insert_job,
            set_application_status, HiredRelationship, JobExt,
        },
        userdb::UserExt,
    },
    dtos::jobdtos::CreateJobDto,
    models::{
        jobmodel::{Application, ApplicationStatus, Job},
        usermodel::{User, UserRole},
    },
    service::{
        access::{ensure_job_owner, ensure_role},
        error::ServiceError,
        notification_service::NotificationService,
    },
};

/// What Apply decided for an existing-row lookup. The duplicate case is a
/// reported no-op, not an error: no mutation, no second notification.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ApplyOutcome {
    Created { application: Application },
    AlreadyApplied,
}

/// Hire is an idempotent "set", not a guarded transition: hiring a worker
/// who never applied inserts the row directly at hired, and hiring twice
/// overwrites hired with hired.
#[derive(Debug, PartialEq)]
enum HireAction {
    InsertHired,
    Promote(Uuid),
}

fn apply_is_duplicate(existing: Option<&Application>) -> bool {
    existing.is_some()
}

fn hire_action(existing: Option<&Application>) -> HireAction {
    match existing {
        Some(application) => HireAction::Promote(application.id),
        None => HireAction::InsertHired,
    }
}

#[derive(Debug, Serialize)]
pub struct HireResult {
    pub application: Application,
    pub job: Job,
}

#[derive(Debug, Clone)]
pub struct JobService {
    db_client: Arc<DBClient>,
    notification_service: Arc<NotificationService>,
}

impl JobService {
    pub fn new(db_client: Arc<DBClient>, notification_service: Arc<NotificationService>) -> Self {
        Self {
            db_client,
            notification_service,
        }
    }

    /// Insert the job and fan one notification out to every approved
    /// worker, atomically.
    pub async fn post_job(&self, actor: &User, job_data: CreateJobDto) -> Result<Job, ServiceError> {
        ensure_role(actor, &[UserRole::Client])?;

        let workers = self.db_client.find_approved_workers(None, None).await?;

        let mut tx = self.db_client.pool.begin().await?;

        let job = insert_job(
            &mut tx,
            actor.id,
            &job_data.title,
            &job_data.description,
            job_data.location.as_deref(),
        )
        .await?;

        for worker in &workers {
            self.notification_service
                .notify_new_job_tx(&mut tx, worker.id, &job.title)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            "client {} posted job '{}', notified {} workers",
            actor.id,
            job.title,
            workers.len()
        );

        Ok(job)
    }

    /// unapplied -> applied. A second apply from the same worker is a
    /// reported no-op; the row insert and the client notification commit
    /// together or not at all.
    pub async fn apply_to_job(&self, actor: &User, job_id: Uuid) -> Result<ApplyOutcome, ServiceError> {
        ensure_role(actor, &[UserRole::Worker])?;

        let mut tx = self.db_client.pool.begin().await?;

        let job = get_job_for_update(&mut tx, job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        let existing = get_application_in_tx(&mut tx, job_id, actor.id).await?;
        if apply_is_duplicate(existing.as_ref()) {
            return Ok(ApplyOutcome::AlreadyApplied);
        }

        let application = insert_application(
            &mut tx,
            job.id,
            actor.id,
            job.client_id,
            ApplicationStatus::Applied,
        )
        .await?;

        self.notification_service
            .notify_application_tx(&mut tx, job.client_id, &actor.name, &job.title)
            .await?;

        tx.commit().await?;

        Ok(ApplyOutcome::Created { application })
    }

    /// The terminal transition. Upserts the application to hired, closes
    /// the job, and notifies the worker; all three writes are atomic.
    /// An already-closed job is not rejected; re-hiring just overwrites.
    pub async fn hire_worker(
        &self,
        actor: &User,
        worker_id: Uuid,
        job_id: Uuid,
    ) -> Result<HireResult, ServiceError> {
        ensure_role(actor, &[UserRole::Client])?;

        let worker = self
            .db_client
            .get_user(Some(worker_id), None)
            .await?
            .ok_or(ServiceError::UserNotFound(worker_id))?;

        let mut tx = self.db_client.pool.begin().await?;

        let job = get_job_for_update(&mut tx, job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        ensure_job_owner(actor, &job)?;

        let existing = get_application_in_tx(&mut tx, job_id, worker.id).await?;
        let application = match hire_action(existing.as_ref()) {
            HireAction::InsertHired => {
                insert_application(
                    &mut tx,
                    job.id,
                    worker.id,
                    job.client_id,
                    ApplicationStatus::Hired,
                )
                .await?
            }
            HireAction::Promote(application_id) => {
                set_application_status(&mut tx, application_id, ApplicationStatus::Hired).await?
            }
        };

        let closed_job = close_job(&mut tx, job.id).await?;

        self.notification_service
            .notify_hired_tx(&mut tx, worker.id, &closed_job.title)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "client {} hired worker {} for job '{}'",
            actor.id,
            worker.id,
            closed_job.title
        );

        Ok(HireResult {
            application,
            job: closed_job,
        })
    }

    /// All (client, job) pairs where this worker holds a hired application.
    pub async fn hired_relationships(
        &self,
        actor: &User,
    ) -> Result<Vec<HiredRelationship>, ServiceError> {
        ensure_role(actor, &[UserRole::Worker])?;

        let relationships = self.db_client.get_hired_relationships(actor.id).await?;
        Ok(relationships)
    }

    /// Client-scoped hire predicate gating contact reveal: true iff the
    /// worker is hired on any job owned by this client.
    pub async fn is_hired(&self, worker_id: Uuid, client_id: Uuid) -> Result<bool, ServiceError> {
        let hired = self.db_client.is_hired(worker_id, client_id).await?;
        Ok(hired)
    }

    pub async fn find_jobs(
        &self,
        search: Option<&str>,
        location: Option<&str>,
    ) -> Result<Vec<Job>, ServiceError> {
        let jobs = self.db_client.get_open_jobs(search, location).await?;
        Ok(jobs)
    }

    pub async fn jobs_for_client(&self, client_id: Uuid) -> Result<Vec<Job>, ServiceError> {
        let jobs = self.db_client.get_jobs_by_client(client_id).await?;
        Ok(jobs)
    }

    pub async fn applications_for_client(
        &self,
        actor: &User,
    ) -> Result<Vec<Application>, ServiceError> {
        ensure_role(actor, &[UserRole::Client])?;

        let applications = self.db_client.get_applications_by_client(actor.id).await?;
        Ok(applications)
    }

    pub async fn applied_job_ids(&self, worker_id: Uuid) -> Result<Vec<Uuid>, ServiceError> {
        let ids = self.db_client.get_applied_job_ids(worker_id).await?;
        Ok(ids)
    }

    pub async fn get_job(&self, job_id: Uuid) -> Result<Job, ServiceError> {
        self.db_client
            .get_job(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn application(status: ApplicationStatus) -> Application {
        Application {
            id: Uuid::new_v4(),
            job_id: Uuid::new_v4(),
            worker_id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn first_apply_creates_a_row() {
        assert!(!apply_is_duplicate(None));
    }

    #[test]
    fn repeat_apply_is_a_noop_regardless_of_status() {
        let applied = application(ApplicationStatus::Applied);
        assert!(apply_is_duplicate(Some(&applied)));

        let hired = application(ApplicationStatus::Hired);
        assert!(apply_is_duplicate(Some(&hired)));
    }

    #[test]
    fn hiring_without_prior_application_inserts_directly_as_hired() {
        assert_eq!(hire_action(None), HireAction::InsertHired);
    }

    #[test]
    fn hiring_an_applicant_promotes_the_existing_row() {
        let applied = application(ApplicationStatus::Applied);
        assert_eq!(
            hire_action(Some(&applied)),
            HireAction::Promote(applied.id)
        );
    }

    #[test]
    fn hiring_twice_overwrites_the_same_row() {
        // Idempotent set: the second hire targets the same application id
        // instead of inserting a duplicate.
        let hired = application(ApplicationStatus::Hired);
        assert_eq!(hire_action(Some(&hired)), HireAction::Promote(hired.id));
    }
}
