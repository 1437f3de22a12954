use crate::models::{Question, User};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Repository Trait
///
/// The abstract contract for all persistence operations, letting the
/// handlers talk to the data layer without knowing the implementation
/// (Postgres in production, mocks in tests).
///
/// Methods return `sqlx::Result` so the handlers propagate storage failures
/// with `?` and map them to API errors in one place, rather than each query
/// deciding how to degrade.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Questions ---

    /// Persists a new question owned by `user_id`, generating its id and
    /// timestamps, and returns the stored row.
    async fn create_question(&self, user_id: Uuid, content: &str) -> sqlx::Result<Question>;

    async fn get_question(&self, id: Uuid) -> sqlx::Result<Option<Question>>;

    /// Every question, in creation order.
    async fn get_all_questions(&self) -> sqlx::Result<Vec<Question>>;

    /// Every question authored by `user_id`, in creation order.
    async fn get_questions_by_user(&self, user_id: Uuid) -> sqlx::Result<Vec<Question>>;

    /// Replaces the content of an existing question in place. Id, author and
    /// `created_at` are preserved; returns `None` if the id does not exist.
    async fn update_question_content(
        &self,
        id: Uuid,
        content: &str,
    ) -> sqlx::Result<Option<Question>>;

    /// Removes a question permanently. Returns whether a row was deleted.
    /// Ownership checks happen in the handler, which has the caller's
    /// identity and role.
    async fn delete_question(&self, id: Uuid) -> sqlx::Result<bool>;

    // --- Users ---

    async fn get_user(&self, id: Uuid) -> sqlx::Result<Option<User>>;

    async fn create_user(&self, email: &str, role: &str) -> sqlx::Result<User>;
}

/// RepositoryState
///
/// The concrete type shared through the application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// The production `Repository`, backed by a sqlx connection pool.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    async fn create_question(&self, user_id: Uuid, content: &str) -> sqlx::Result<Question> {
        let new_id = Uuid::new_v4();
        sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (id, user_id, content, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING id, user_id, content, created_at, updated_at
            "#,
        )
        .bind(new_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_question(&self, id: Uuid) -> sqlx::Result<Option<Question>> {
        sqlx::query_as::<_, Question>(
            "SELECT id, user_id, content, created_at, updated_at FROM questions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_all_questions(&self) -> sqlx::Result<Vec<Question>> {
        // Creation order; the id tiebreak keeps the ordering stable for rows
        // sharing a timestamp.
        sqlx::query_as::<_, Question>(
            r#"
            SELECT id, user_id, content, created_at, updated_at
            FROM questions
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_questions_by_user(&self, user_id: Uuid) -> sqlx::Result<Vec<Question>> {
        sqlx::query_as::<_, Question>(
            r#"
            SELECT id, user_id, content, created_at, updated_at
            FROM questions
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_question_content(
        &self,
        id: Uuid,
        content: &str,
    ) -> sqlx::Result<Option<Question>> {
        sqlx::query_as::<_, Question>(
            r#"
            UPDATE questions
            SET content = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, content, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_question(&self, id: Uuid) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_user(&self, id: Uuid) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>("SELECT id, email, role FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn create_user(&self, email: &str, role: &str) -> sqlx::Result<User> {
        let new_id = Uuid::new_v4();
        sqlx::query_as::<_, User>(
            "INSERT INTO profiles (id, email, role) VALUES ($1, $2, $3) RETURNING id, email, role",
        )
        .bind(new_id)
        .bind(email)
        .bind(role)
        .fetch_one(&self.pool)
        .await
    }
}
