//! Store contracts and their implementations
//!
//! Services only see the traits below. [`UserRepository`],
//! [`SessionRepository`] and [`MovieRepository`] back them with PostgreSQL;
//! [`MemoryStore`] keeps everything in process for tests.

use async_trait::async_trait;
use common::error::DatabaseResult;

use crate::models::{Movie, NewMovie, NewSession, NewUser, Session, User};

pub mod memory;
pub mod movie;
pub mod session;
pub mod user;

pub use memory::MemoryStore;
pub use movie::MovieRepository;
pub use session::SessionRepository;
pub use user::UserRepository;

/// Unique constraint on `users.username`
pub const USERS_USERNAME_KEY: &str = "users_username_key";
/// Unique constraint on `users.email`
pub const USERS_EMAIL_KEY: &str = "users_email_key";
/// Unique constraint on `sessions.session`
pub const SESSIONS_SESSION_KEY: &str = "sessions_session_key";
/// Unique constraint on `(movies.user_id, movies.tmdb_id)`
pub const MOVIES_USER_TMDB_KEY: &str = "movies_user_id_tmdb_id_key";
/// Foreign key from `movies.user_id` to `users.id`
pub const MOVIES_USER_FKEY: &str = "movies_user_id_fkey";

/// Credential store
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user, failing with a unique violation on a taken username or email
    async fn create_user(&self, new_user: &NewUser) -> DatabaseResult<User>;

    async fn find_user_by_username(&self, username: &str) -> DatabaseResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> DatabaseResult<Option<User>>;
}

/// Session store
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert a session, failing with a unique violation on a token already in use
    async fn create_session(&self, new_session: &NewSession) -> DatabaseResult<Session>;

    async fn find_session(&self, token: &str) -> DatabaseResult<Option<Session>>;

    /// Returns whether a session was removed
    async fn delete_session(&self, token: &str) -> DatabaseResult<bool>;
}

/// Activity store
///
/// Every lookup by movie id is scoped to its owner.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Insert an entry, failing with a unique violation when the user already
    /// logged this catalog id and a foreign key violation for an unknown user
    async fn create_movie(&self, new_movie: &NewMovie) -> DatabaseResult<Movie>;

    /// All entries of a user ordered by watch date, then id
    async fn list_movies(&self, user_id: i64) -> DatabaseResult<Vec<Movie>>;

    async fn find_movie(&self, user_id: i64, movie_id: i64) -> DatabaseResult<Option<Movie>>;

    /// Returns whether an entry was removed
    async fn delete_movie(&self, user_id: i64, movie_id: i64) -> DatabaseResult<bool>;
}
