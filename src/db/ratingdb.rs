// db/ratingdb.rs
use async_trait::async_trait;
use sqlx::PgConnection;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::ratingmodel::Rating;

const RATING_COLUMNS: &str = "id, recipient_id, author_id, job_id, score, comment, created_at";

#[async_trait]
pub trait RatingExt {
    async fn get_ratings_for_user(&self, recipient_id: Uuid) -> Result<Vec<Rating>, sqlx::Error>;

    /// Arithmetic mean of all scores received, or None when unrated.
    async fn get_average_rating(&self, recipient_id: Uuid) -> Result<Option<f64>, sqlx::Error>;

    async fn get_rating_count(&self, recipient_id: Uuid) -> Result<i64, sqlx::Error>;
}

#[async_trait]
impl RatingExt for DBClient {
    async fn get_ratings_for_user(&self, recipient_id: Uuid) -> Result<Vec<Rating>, sqlx::Error> {
        sqlx::query_as::<_, Rating>(&format!(
            r#"
            SELECT {}
            FROM ratings
            WHERE recipient_id = $1
            ORDER BY created_at DESC
            "#,
            RATING_COLUMNS
        ))
        .bind(recipient_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_average_rating(&self, recipient_id: Uuid) -> Result<Option<f64>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<f64>>(
            "SELECT AVG(score)::float8 FROM ratings WHERE recipient_id = $1",
        )
        .bind(recipient_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_rating_count(&self, recipient_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM ratings WHERE recipient_id = $1")
            .bind(recipient_id)
            .fetch_one(&self.pool)
            .await
    }
}

/// Upsert on the (recipient, author, job_id) natural key: a repeat rating
/// from the same author for the same job replaces score, comment and
/// timestamp instead of accumulating rows.
pub async fn upsert_rating(
    conn: &mut PgConnection,
    recipient_id: Uuid,
    author_id: Uuid,
    job_id: Option<Uuid>,
    score: i32,
    comment: Option<String>,
) -> Result<Rating, sqlx::Error> {
    sqlx::query_as::<_, Rating>(&format!(
        r#"
        INSERT INTO ratings (recipient_id, author_id, job_id, score, comment)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (recipient_id, author_id, job_id)
        DO UPDATE SET score = EXCLUDED.score,
                      comment = EXCLUDED.comment,
                      created_at = NOW()
        RETURNING {}
        "#,
        RATING_COLUMNS
    ))
    .bind(recipient_id)
    .bind(author_id)
    .bind(job_id)
    .bind(score)
    .bind(comment)
    .fetch_one(conn)
    .await
}
