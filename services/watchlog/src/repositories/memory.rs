//! In-process store used as a test double for the PostgreSQL repositories
//!
//! All three tables live behind a single lock, so a uniqueness check and the
//! insert it guards are one atomic step, like a constraint in the database.
//! Violations carry the same constraint names as the schema.

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{
    MOVIES_USER_FKEY, MOVIES_USER_TMDB_KEY, MovieStore, SESSIONS_SESSION_KEY, SessionStore,
    USERS_EMAIL_KEY, USERS_USERNAME_KEY, UserStore,
};
use crate::models::{Movie, NewMovie, NewSession, NewUser, Session, User};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    sessions: Vec<Session>,
    movies: Vec<Movie>,
    next_user_id: i64,
    next_session_id: i64,
    next_movie_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

fn unique_violation(constraint: &str) -> DatabaseError {
    DatabaseError::UniqueViolation {
        constraint: Some(constraint.to_string()),
    }
}

/// Shared in-memory tables; clones see the same data
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, new_user: &NewUser) -> DatabaseResult<User> {
        let mut tables = self.tables.lock().await;

        if tables.users.iter().any(|u| u.username == new_user.username) {
            return Err(unique_violation(USERS_USERNAME_KEY));
        }
        if tables.users.iter().any(|u| u.email == new_user.email) {
            return Err(unique_violation(USERS_EMAIL_KEY));
        }

        let user = User {
            id: next_id(&mut tables.next_user_id),
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            password_hash: new_user.password_hash.clone(),
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());

        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create_session(&self, new_session: &NewSession) -> DatabaseResult<Session> {
        let mut tables = self.tables.lock().await;

        if tables
            .sessions
            .iter()
            .any(|s| s.session == new_session.session)
        {
            return Err(unique_violation(SESSIONS_SESSION_KEY));
        }

        let session = Session {
            id: next_id(&mut tables.next_session_id),
            session: new_session.session.clone(),
            username: new_session.username.clone(),
            created_at: Utc::now(),
        };
        tables.sessions.push(session.clone());

        Ok(session)
    }

    async fn find_session(&self, token: &str) -> DatabaseResult<Option<Session>> {
        let tables = self.tables.lock().await;
        Ok(tables.sessions.iter().find(|s| s.session == token).cloned())
    }

    async fn delete_session(&self, token: &str) -> DatabaseResult<bool> {
        let mut tables = self.tables.lock().await;
        let before = tables.sessions.len();
        tables.sessions.retain(|s| s.session != token);
        Ok(tables.sessions.len() < before)
    }
}

#[async_trait]
impl MovieStore for MemoryStore {
    async fn create_movie(&self, new_movie: &NewMovie) -> DatabaseResult<Movie> {
        let mut tables = self.tables.lock().await;

        if !tables.users.iter().any(|u| u.id == new_movie.user_id) {
            return Err(DatabaseError::ForeignKeyViolation {
                constraint: Some(MOVIES_USER_FKEY.to_string()),
            });
        }
        if tables
            .movies
            .iter()
            .any(|m| m.user_id == new_movie.user_id && m.tmdb_id == new_movie.tmdb_id)
        {
            return Err(unique_violation(MOVIES_USER_TMDB_KEY));
        }

        let movie = Movie {
            id: next_id(&mut tables.next_movie_id),
            tmdb_id: new_movie.tmdb_id,
            date: new_movie.date,
            rating: new_movie.rating,
            review: new_movie.review.clone(),
            poster_path: new_movie.poster_path.clone(),
            user_id: new_movie.user_id,
            created_at: Utc::now(),
        };
        tables.movies.push(movie.clone());

        Ok(movie)
    }

    async fn list_movies(&self, user_id: i64) -> DatabaseResult<Vec<Movie>> {
        let tables = self.tables.lock().await;
        let mut movies: Vec<Movie> = tables
            .movies
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        movies.sort_by_key(|m| (m.date, m.id));
        Ok(movies)
    }

    async fn find_movie(&self, user_id: i64, movie_id: i64) -> DatabaseResult<Option<Movie>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .movies
            .iter()
            .find(|m| m.user_id == user_id && m.id == movie_id)
            .cloned())
    }

    async fn delete_movie(&self, user_id: i64, movie_id: i64) -> DatabaseResult<bool> {
        let mut tables = self.tables.lock().await;
        let before = tables.movies.len();
        tables
            .movies
            .retain(|m| !(m.user_id == user_id && m.id == movie_id));
        Ok(tables.movies.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
        }
    }

    #[tokio::test]
    async fn test_user_uniqueness_reports_constraint() {
        let store = MemoryStore::new();
        store.create_user(&new_user("alice", "a@x.com")).await.unwrap();

        let err = store
            .create_user(&new_user("alice", "b@y.com"))
            .await
            .unwrap_err();
        assert_eq!(err.constraint(), Some(USERS_USERNAME_KEY));

        let err = store
            .create_user(&new_user("bob", "a@x.com"))
            .await
            .unwrap_err();
        assert_eq!(err.constraint(), Some(USERS_EMAIL_KEY));
    }

    #[tokio::test]
    async fn test_movie_requires_existing_user() {
        let store = MemoryStore::new();
        let err = store
            .create_movie(&NewMovie {
                tmdb_id: 550,
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                rating: 5,
                review: None,
                poster_path: None,
                user_id: 42,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DatabaseError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_clones_share_tables() {
        let store = MemoryStore::new();
        let other = store.clone();

        store
            .create_session(&NewSession {
                session: "tok".to_string(),
                username: None,
            })
            .await
            .unwrap();

        assert!(other.find_session("tok").await.unwrap().is_some());
    }
}
