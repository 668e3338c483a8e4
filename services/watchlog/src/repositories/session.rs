//! Session repository for database operations

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::PgPool;
use tracing::info;

use super::SessionStore;
use crate::models::{NewSession, Session};

/// Session repository
#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn create_session(&self, new_session: &NewSession) -> DatabaseResult<Session> {
        info!("Creating session for user: {:?}", new_session.username);

        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (session, username)
            VALUES ($1, $2)
            RETURNING id, session, username, created_at
            "#,
        )
        .bind(&new_session.session)
        .bind(&new_session.username)
        .fetch_one(&self.pool)
        .await?;

        Ok(session)
    }

    async fn find_session(&self, token: &str) -> DatabaseResult<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, session, username, created_at
            FROM sessions
            WHERE session = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    async fn delete_session(&self, token: &str) -> DatabaseResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE session = $1
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
