//! Watched-movie entries

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A movie logged by a user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub id: i64,
    /// TMDB catalog id
    pub tmdb_id: i64,
    /// Day the movie was watched
    pub date: NaiveDate,
    pub rating: i32,
    pub review: Option<String>,
    pub poster_path: Option<String>,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// New movie entry payload
///
/// Clients send camelCase keys; the snake_case column names are accepted too.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    #[serde(alias = "tmdb_id")]
    pub tmdb_id: i64,
    #[serde(rename = "watchDate", alias = "date")]
    pub date: NaiveDate,
    pub rating: i32,
    pub review: Option<String>,
    #[serde(alias = "poster_path")]
    pub poster_path: Option<String>,
    #[serde(alias = "user_id")]
    pub user_id: i64,
}
