//! Movie repository for database operations

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::PgPool;

use super::MovieStore;
use crate::models::{Movie, NewMovie};

/// Movie repository
#[derive(Clone)]
pub struct MovieRepository {
    pool: PgPool,
}

impl MovieRepository {
    /// Create a new movie repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieStore for MovieRepository {
    async fn create_movie(&self, new_movie: &NewMovie) -> DatabaseResult<Movie> {
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            INSERT INTO movies (tmdb_id, date, rating, review, poster_path, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, tmdb_id, date, rating, review, poster_path, user_id, created_at
            "#,
        )
        .bind(new_movie.tmdb_id)
        .bind(new_movie.date)
        .bind(new_movie.rating)
        .bind(&new_movie.review)
        .bind(&new_movie.poster_path)
        .bind(new_movie.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(movie)
    }

    async fn list_movies(&self, user_id: i64) -> DatabaseResult<Vec<Movie>> {
        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, tmdb_id, date, rating, review, poster_path, user_id, created_at
            FROM movies
            WHERE user_id = $1
            ORDER BY date ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(movies)
    }

    async fn find_movie(&self, user_id: i64, movie_id: i64) -> DatabaseResult<Option<Movie>> {
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, tmdb_id, date, rating, review, poster_path, user_id, created_at
            FROM movies
            WHERE user_id = $1 AND id = $2
            "#,
        )
        .bind(user_id)
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(movie)
    }

    async fn delete_movie(&self, user_id: i64, movie_id: i64) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM movies WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(movie_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
