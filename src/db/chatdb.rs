// db/chatdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::chatmodel::Message;

const MESSAGE_COLUMNS: &str = "id, sender_id, receiver_id, content, created_at";

#[async_trait]
pub trait ChatExt {
    async fn save_message(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: String,
    ) -> Result<Message, sqlx::Error>;

    /// Full conversation between two users: both directed pairs, oldest
    /// first for display.
    async fn get_conversation(
        &self,
        user_a: Uuid,
        user_b: Uuid,
    ) -> Result<Vec<Message>, sqlx::Error>;

    /// Distinct counterpart ids this user has exchanged messages with.
    async fn get_chat_partner_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error>;
}

#[async_trait]
impl ChatExt for DBClient {
    async fn save_message(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: String,
    ) -> Result<Message, sqlx::Error> {
        sqlx::query_as::<_, Message>(&format!(
            r#"
            INSERT INTO messages (sender_id, receiver_id, content)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            MESSAGE_COLUMNS
        ))
        .bind(sender_id)
        .bind(receiver_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_conversation(
        &self,
        user_a: Uuid,
        user_b: Uuid,
    ) -> Result<Vec<Message>, sqlx::Error> {
        sqlx::query_as::<_, Message>(&format!(
            r#"
            SELECT {}
            FROM messages
            WHERE (sender_id = $1 AND receiver_id = $2)
               OR (sender_id = $2 AND receiver_id = $1)
            ORDER BY created_at ASC
            "#,
            MESSAGE_COLUMNS
        ))
        .bind(user_a)
        .bind(user_b)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_chat_partner_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT DISTINCT receiver_id FROM messages WHERE sender_id = $1
            UNION
            SELECT DISTINCT sender_id FROM messages WHERE receiver_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }
}
