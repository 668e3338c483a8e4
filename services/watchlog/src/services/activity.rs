//! Watched-movie log, always scoped to the owning user

use common::error::DatabaseError;
use std::sync::Arc;
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    models::{Movie, NewMovie},
    repositories::{MOVIES_USER_TMDB_KEY, MovieStore},
    validation,
};

fn movie_not_found(user_id: i64, movie_id: i64) -> ApiError {
    ApiError::NotFound(format!("Movie {} not found for user {}", movie_id, user_id))
}

/// Activity service
#[derive(Clone)]
pub struct ActivityService {
    movies: Arc<dyn MovieStore>,
}

impl ActivityService {
    /// Create a new activity service over the given store
    pub fn new(movies: Arc<dyn MovieStore>) -> Self {
        Self { movies }
    }

    /// Entries of a user, oldest watch date first
    pub async fn list_movies(&self, user_id: i64) -> ApiResult<Vec<Movie>> {
        info!("Listing movies for user: {}", user_id);
        Ok(self.movies.list_movies(user_id).await?)
    }

    pub async fn get_movie(&self, user_id: i64, movie_id: i64) -> ApiResult<Movie> {
        self.movies
            .find_movie(user_id, movie_id)
            .await?
            .ok_or_else(|| movie_not_found(user_id, movie_id))
    }

    /// Log a movie; each catalog id can be logged once per user
    pub async fn add_movie(&self, new_movie: NewMovie) -> ApiResult<Movie> {
        info!(
            "Adding movie {} for user: {}",
            new_movie.tmdb_id, new_movie.user_id
        );

        validation::validate_movie(new_movie.tmdb_id, new_movie.rating)
            .map_err(ApiError::Validation)?;

        self.movies
            .create_movie(&new_movie)
            .await
            .map_err(|err| match err {
                DatabaseError::UniqueViolation { ref constraint }
                    if constraint.as_deref() == Some(MOVIES_USER_TMDB_KEY) =>
                {
                    ApiError::Conflict(format!(
                        "Movie {} is already logged for user {}",
                        new_movie.tmdb_id, new_movie.user_id
                    ))
                }
                DatabaseError::ForeignKeyViolation { .. } => {
                    ApiError::NotFound(format!("User {} not found", new_movie.user_id))
                }
                other => ApiError::Database(other),
            })
    }

    pub async fn delete_movie(&self, user_id: i64, movie_id: i64) -> ApiResult<()> {
        info!("Deleting movie {} for user: {}", movie_id, user_id);

        if self.movies.delete_movie(user_id, movie_id).await? {
            Ok(())
        } else {
            Err(movie_not_found(user_id, movie_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::NewUser,
        repositories::{MemoryStore, UserStore},
    };
    use chrono::NaiveDate;
    use std::collections::HashSet;

    async fn service_with_users(usernames: &[&str]) -> (ActivityService, Vec<i64>) {
        let store = MemoryStore::new();
        let mut ids = Vec::new();
        for name in usernames {
            let user = store
                .create_user(&NewUser {
                    username: name.to_string(),
                    email: format!("{}@x.com", name),
                    password_hash: "$argon2id$placeholder".to_string(),
                })
                .await
                .unwrap();
            ids.push(user.id);
        }
        (ActivityService::new(Arc::new(store)), ids)
    }

    fn entry(user_id: i64, tmdb_id: i64, date: &str) -> NewMovie {
        NewMovie {
            tmdb_id,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            rating: 5,
            review: Some("great".to_string()),
            poster_path: Some("/p.jpg".to_string()),
            user_id,
        }
    }

    #[tokio::test]
    async fn test_add_same_movie_twice_conflicts() {
        let (activity, ids) = service_with_users(&["alice"]).await;
        let user_id = ids[0];

        let movie = activity
            .add_movie(entry(user_id, 550, "2024-01-01"))
            .await
            .unwrap();
        assert!(movie.id > 0);
        assert_eq!(movie.tmdb_id, 550);
        assert_eq!(movie.review.as_deref(), Some("great"));

        let err = activity
            .add_movie(entry(user_id, 550, "2024-03-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));

        let listed = activity.list_movies(user_id).await.unwrap();
        let distinct: HashSet<i64> = listed.iter().map(|m| m.tmdb_id).collect();
        assert_eq!(listed.len(), distinct.len());
    }

    #[tokio::test]
    async fn test_same_movie_for_different_users() {
        let (activity, ids) = service_with_users(&["alice", "bob"]).await;

        activity.add_movie(entry(ids[0], 550, "2024-01-01")).await.unwrap();
        activity.add_movie(entry(ids[1], 550, "2024-01-01")).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_watch_date() {
        let (activity, ids) = service_with_users(&["alice"]).await;
        let user_id = ids[0];

        activity.add_movie(entry(user_id, 680, "2024-02-01")).await.unwrap();
        activity.add_movie(entry(user_id, 550, "2024-01-01")).await.unwrap();

        let listed = activity.list_movies(user_id).await.unwrap();
        let dates: Vec<String> = listed.iter().map(|m| m.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-02-01"]);
    }

    #[tokio::test]
    async fn test_list_for_user_without_movies_is_empty() {
        let (activity, _) = service_with_users(&[]).await;
        assert!(activity.list_movies(7).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_is_scoped_to_owner() {
        let (activity, ids) = service_with_users(&["alice", "bob"]).await;
        let movie = activity.add_movie(entry(ids[0], 550, "2024-01-01")).await.unwrap();

        assert_eq!(activity.get_movie(ids[0], movie.id).await.unwrap().id, movie.id);
        assert!(matches!(
            activity.get_movie(ids[1], movie.id).await.unwrap_err(),
            ApiError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (activity, ids) = service_with_users(&["alice"]).await;
        let movie = activity.add_movie(entry(ids[0], 550, "2024-01-01")).await.unwrap();

        activity.delete_movie(ids[0], movie.id).await.unwrap();

        assert!(matches!(
            activity.get_movie(ids[0], movie.id).await.unwrap_err(),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            activity.delete_movie(ids[0], movie.id).await.unwrap_err(),
            ApiError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_delete_other_users_movie_is_not_found() {
        let (activity, ids) = service_with_users(&["alice", "bob"]).await;
        let movie = activity.add_movie(entry(ids[0], 550, "2024-01-01")).await.unwrap();

        assert!(matches!(
            activity.delete_movie(ids[1], movie.id).await.unwrap_err(),
            ApiError::NotFound(_)
        ));
        assert!(activity.get_movie(ids[0], movie.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_add_for_unknown_user_is_not_found() {
        let (activity, _) = service_with_users(&[]).await;
        let err = activity.add_movie(entry(99, 550, "2024-01-01")).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_rating_out_of_range_is_rejected() {
        let (activity, ids) = service_with_users(&["alice"]).await;
        let mut movie = entry(ids[0], 550, "2024-01-01");
        movie.rating = 11;

        let err = activity.add_movie(movie).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
