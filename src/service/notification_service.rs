// service/notification_service.rs
use std::sync::Arc;

use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    db::{db::DBClient, notificationdb::{insert_notification, NotificationExt}},
    models::notificationmodel::Notification,
    service::error::ServiceError,
};

fn new_job_message(job_title: &str) -> String {
    format!("New Job: {}", job_title)
}

fn application_message(worker_name: &str, job_title: &str) -> String {
    format!("{} applied for your job: {}", worker_name, job_title)
}

fn hired_message(job_title: &str) -> String {
    format!("You were hired for job: {}", job_title)
}

fn rating_message(score: i32, author_name: &str) -> String {
    format!("You received a {}-star rating from {}", score, author_name)
}

/// Wording and delivery for the append-only notification sink. Writers
/// that are part of a larger state transition use the `*_tx` variants so
/// the notification commits with the rows it reports on.
#[derive(Debug, Clone)]
pub struct NotificationService {
    db_client: Arc<DBClient>,
}

impl NotificationService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn notify_new_job_tx(
        &self,
        conn: &mut PgConnection,
        worker_id: Uuid,
        job_title: &str,
    ) -> Result<(), ServiceError> {
        insert_notification(conn, worker_id, &new_job_message(job_title)).await?;
        Ok(())
    }

    pub async fn notify_application_tx(
        &self,
        conn: &mut PgConnection,
        client_id: Uuid,
        worker_name: &str,
        job_title: &str,
    ) -> Result<(), ServiceError> {
        tracing::info!(
            "application notification: client {} for job '{}'",
            client_id,
            job_title
        );

        insert_notification(conn, client_id, &application_message(worker_name, job_title))
            .await?;
        Ok(())
    }

    pub async fn notify_hired_tx(
        &self,
        conn: &mut PgConnection,
        worker_id: Uuid,
        job_title: &str,
    ) -> Result<(), ServiceError> {
        tracing::info!(
            "hire notification: worker {} for job '{}'",
            worker_id,
            job_title
        );

        insert_notification(conn, worker_id, &hired_message(job_title)).await?;
        Ok(())
    }

    pub async fn notify_rating_tx(
        &self,
        conn: &mut PgConnection,
        recipient_id: Uuid,
        score: i32,
        author_name: &str,
    ) -> Result<(), ServiceError> {
        insert_notification(conn, recipient_id, &rating_message(score, author_name)).await?;
        Ok(())
    }

    pub async fn list(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, ServiceError> {
        let notifications = self
            .db_client
            .get_user_notifications(user_id, limit, offset)
            .await?;
        Ok(notifications)
    }

    pub async fn unread_count(&self, user_id: Uuid) -> Result<i64, ServiceError> {
        let count = self.db_client.get_unread_count(user_id).await?;
        Ok(count)
    }

    /// Succeeds whether or not the actor owns the notification; a
    /// non-owner attempt flips nothing.
    pub async fn mark_read(&self, notification_id: Uuid, user_id: Uuid) -> Result<(), ServiceError> {
        let affected = self
            .db_client
            .mark_notification_read(notification_id, user_id)
            .await?;

        if affected == 0 {
            tracing::debug!(
                "mark_read matched no rows for notification {} and user {}",
                notification_id,
                user_id
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wording_matches_the_ui_copy() {
        assert_eq!(new_job_message("Fix the sink"), "New Job: Fix the sink");
        assert_eq!(
            application_message("Asha", "Fix the sink"),
            "Asha applied for your job: Fix the sink"
        );
        assert_eq!(
            hired_message("Fix the sink"),
            "You were hired for job: Fix the sink"
        );
        assert_eq!(
            rating_message(4, "Asha"),
            "You received a 4-star rating from Asha"
        );
    }

    #[test]
    fn longest_legal_apply_message_stays_whole() {
        // users.name allows 100 chars and jobs.title 200, so the combined
        // wording passes 255; notifications.message is TEXT to hold it.
        let name = "n".repeat(100);
        let title = "t".repeat(200);

        let message = application_message(&name, &title);
        assert!(message.len() > 255);
        assert!(message.starts_with(&name));
        assert!(message.ends_with(&title));
    }
}
