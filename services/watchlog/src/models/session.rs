//! Session model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Session entity
///
/// `session` is the opaque token chosen by the client.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: i64,
    pub session: String,
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// New session creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSession {
    pub session: String,
    pub username: Option<String>,
}
