// service/rating_service.rs
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{
        db::DBClient,
        jobdb::JobExt,
        ratingdb::{upsert_rating, RatingExt},
        userdb::UserExt,
    },
    dtos::ratingdtos::SubmitRatingDto,
    models::{ratingmodel::Rating, usermodel::User},
    service::{error::ServiceError, notification_service::NotificationService},
};

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 5;

/// Score gate, kept as an explicit predicate on top of the DTO validator
/// so the service rejects out-of-range scores from any caller.
fn validate_score(score: i32) -> Result<(), ServiceError> {
    if (MIN_SCORE..=MAX_SCORE).contains(&score) {
        Ok(())
    } else {
        Err(ServiceError::Validation(format!(
            "Score must be between {} and {}",
            MIN_SCORE, MAX_SCORE
        )))
    }
}

/// Arithmetic mean rounded to one decimal place for display.
pub fn round_average(avg: f64) -> f64 {
    (avg * 10.0).round() / 10.0
}

#[derive(Debug, Clone)]
pub struct RatingService {
    db_client: Arc<DBClient>,
    notification_service: Arc<NotificationService>,
}

impl RatingService {
    pub fn new(db_client: Arc<DBClient>, notification_service: Arc<NotificationService>) -> Self {
        Self {
            db_client,
            notification_service,
        }
    }

    /// Upsert on (recipient, author, job_id) plus one notification to the
    /// recipient, in a single transaction. Re-rating the same triple
    /// replaces score and comment instead of adding a row. A missing
    /// recipient or job is a not-found, never a constraint failure.
    pub async fn submit_rating(
        &self,
        actor: &User,
        recipient_id: Uuid,
        rating_data: SubmitRatingDto,
    ) -> Result<Rating, ServiceError> {
        validate_score(rating_data.score)?;

        self.db_client
            .get_user(Some(recipient_id), None)
            .await?
            .ok_or(ServiceError::UserNotFound(recipient_id))?;

        if let Some(job_id) = rating_data.job_id {
            self.db_client
                .get_job(job_id)
                .await?
                .ok_or(ServiceError::JobNotFound(job_id))?;
        }

        let mut tx = self.db_client.pool.begin().await?;

        let rating = upsert_rating(
            &mut tx,
            recipient_id,
            actor.id,
            rating_data.job_id,
            rating_data.score,
            rating_data.comment,
        )
        .await?;

        self.notification_service
            .notify_rating_tx(&mut tx, recipient_id, rating.score, &actor.name)
            .await?;

        tx.commit().await?;

        Ok(rating)
    }

    pub async fn ratings_for_user(&self, recipient_id: Uuid) -> Result<Vec<Rating>, ServiceError> {
        let ratings = self.db_client.get_ratings_for_user(recipient_id).await?;
        Ok(ratings)
    }

    /// None is the "unrated" sentinel; callers must not conflate it with
    /// a zero average (which cannot occur, scores start at 1).
    pub async fn average_rating(&self, recipient_id: Uuid) -> Result<Option<f64>, ServiceError> {
        let average = self.db_client.get_average_rating(recipient_id).await?;
        Ok(average.map(round_average))
    }

    pub async fn rating_count(&self, recipient_id: Uuid) -> Result<i64, ServiceError> {
        let count = self.db_client.get_rating_count(recipient_id).await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_scores_are_accepted() {
        assert!(validate_score(1).is_ok());
        assert!(validate_score(5).is_ok());
    }

    #[test]
    fn out_of_range_scores_are_rejected() {
        assert!(matches!(
            validate_score(0),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            validate_score(6),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn average_rounds_to_one_decimal() {
        // scores [4, 5] -> 4.5
        assert_eq!(round_average(9.0 / 2.0), 4.5);
        // scores [3, 4, 4] -> 3.666... -> 3.7
        assert_eq!(round_average(11.0 / 3.0), 3.7);
        // scores [1, 1, 2] -> 1.333... -> 1.3
        assert_eq!(round_average(4.0 / 3.0), 1.3);
    }
}
