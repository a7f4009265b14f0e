// db/userdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::usermodel::{User, UserRole};

pub const USER_COLUMNS: &str = r#"
    id, role, name, email, password, phone, skills, bio, location,
    is_approved, created_at, updated_at
"#;

#[async_trait]
pub trait UserExt {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn get_users(&self, page: u32, limit: usize) -> Result<Vec<User>, sqlx::Error>;

    async fn save_user<T: Into<String> + Send>(
        &self,
        role: UserRole,
        name: T,
        email: T,
        password: T,
        skills: Option<String>,
        phone: Option<String>,
        location: Option<String>,
    ) -> Result<User, sqlx::Error>;

    async fn get_admin_user(&self) -> Result<Option<User>, sqlx::Error>;

    /// Approved workers, optionally narrowed by skill and location substrings.
    async fn find_approved_workers(
        &self,
        skill: Option<&str>,
        location: Option<&str>,
    ) -> Result<Vec<User>, sqlx::Error>;

    async fn update_user_profile(
        &self,
        user_id: Uuid,
        name: String,
        bio: Option<String>,
        skills: Option<String>,
        phone: Option<String>,
        location: Option<String>,
    ) -> Result<User, sqlx::Error>;

    async fn set_user_approval(
        &self,
        user_id: Uuid,
        is_approved: bool,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn delete_user(&self, user_id: Uuid) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut user: Option<User> = None;

        if let Some(user_id) = user_id {
            user = sqlx::query_as::<_, User>(&format!(
                "SELECT {} FROM users WHERE id = $1",
                USER_COLUMNS
            ))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(email) = email {
            user = sqlx::query_as::<_, User>(&format!(
                "SELECT {} FROM users WHERE email = $1",
                USER_COLUMNS
            ))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        }

        Ok(user)
    }

    async fn get_users(&self, page: u32, limit: usize) -> Result<Vec<User>, sqlx::Error> {
        let offset = (page.max(1) - 1) as i64 * limit as i64;

        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            USER_COLUMNS
        ))
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn save_user<T: Into<String> + Send>(
        &self,
        role: UserRole,
        name: T,
        email: T,
        password: T,
        skills: Option<String>,
        phone: Option<String>,
        location: Option<String>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (role, name, email, password, skills, phone, location)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(role)
        .bind(name.into())
        .bind(email.into())
        .bind(password.into())
        .bind(skills)
        .bind(phone)
        .bind(location)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_admin_user(&self) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE role = 'admin'::user_role LIMIT 1",
            USER_COLUMNS
        ))
        .fetch_optional(&self.pool)
        .await
    }

    async fn find_approved_workers(
        &self,
        skill: Option<&str>,
        location: Option<&str>,
    ) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {}
            FROM users
            WHERE role = 'worker'::user_role
              AND is_approved = TRUE
              AND ($1::text IS NULL OR skills ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR location ILIKE '%' || $2 || '%')
            ORDER BY created_at DESC
            "#,
            USER_COLUMNS
        ))
        .bind(skill)
        .bind(location)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_user_profile(
        &self,
        user_id: Uuid,
        name: String,
        bio: Option<String>,
        skills: Option<String>,
        phone: Option<String>,
        location: Option<String>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET name = $2,
                bio = COALESCE($3, bio),
                skills = COALESCE($4, skills),
                phone = COALESCE($5, phone),
                location = COALESCE($6, location),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(user_id)
        .bind(name)
        .bind(bio)
        .bind(skills)
        .bind(phone)
        .bind(location)
        .fetch_one(&self.pool)
        .await
    }

    async fn set_user_approval(
        &self,
        user_id: Uuid,
        is_approved: bool,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET is_approved = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(user_id)
        .bind(is_approved)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
