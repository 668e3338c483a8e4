//! Registration, credential verification and session bookkeeping

use common::error::DatabaseError;
use std::sync::{Arc, OnceLock};
use tracing::{info, warn};

use crate::{
    error::{ApiError, ApiResult},
    models::{LoginCredentials, NewSession, NewUser, RegisterRequest, Session, User},
    password,
    repositories::{
        SESSIONS_SESSION_KEY, SessionStore, USERS_EMAIL_KEY, USERS_USERNAME_KEY, UserStore,
    },
    validation,
};

const USERNAME_TAKEN: &str = "Username is already taken";
const EMAIL_TAKEN: &str = "An account with this email address already exists";

/// Verifier checked when the username is unknown, so both login failures cost one Argon2 run
static DUMMY_HASH: OnceLock<String> = OnceLock::new();

fn dummy_hash() -> ApiResult<String> {
    if let Some(hash) = DUMMY_HASH.get() {
        return Ok(hash.clone());
    }
    let hash = password::hash_password("watchlog-unknown-user")?;
    Ok(DUMMY_HASH.get_or_init(|| hash).clone())
}

/// Runs Argon2 verification off the async executor
async fn verify_off_thread(plaintext: String, stored_hash: String) -> ApiResult<bool> {
    tokio::task::spawn_blocking(move || password::verify_password(&plaintext, &stored_hash))
        .await
        .map_err(|e| ApiError::Internal(format!("Password verification task failed: {}", e)))?
}

/// Turns a store failure on the users or sessions table into an API error
fn map_store_error(err: DatabaseError) -> ApiError {
    if !matches!(err, DatabaseError::UniqueViolation { .. }) {
        return ApiError::Database(err);
    }

    let message = match err.constraint() {
        Some(USERS_USERNAME_KEY) => USERNAME_TAKEN,
        Some(USERS_EMAIL_KEY) => EMAIL_TAKEN,
        Some(SESSIONS_SESSION_KEY) => "Session token is already in use",
        _ => "Resource already exists",
    };
    ApiError::Conflict(message.to_string())
}

/// Auth service
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
}

impl AuthService {
    /// Create a new auth service over the given stores
    pub fn new(users: Arc<dyn UserStore>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { users, sessions }
    }

    /// Register a new account
    ///
    /// The lookups reject the common case early; the store's unique
    /// constraints still decide when two registrations race.
    pub async fn register(&self, request: RegisterRequest) -> ApiResult<User> {
        info!("Registration attempt for user: {}", request.username);

        validation::validate_username(&request.username).map_err(ApiError::Validation)?;
        validation::validate_email(&request.email).map_err(ApiError::Validation)?;
        validation::validate_password(&request.password).map_err(ApiError::Validation)?;

        if self
            .users
            .find_user_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(ApiError::Conflict(USERNAME_TAKEN.to_string()));
        }
        if self.users.find_user_by_email(&request.email).await?.is_some() {
            return Err(ApiError::Conflict(EMAIL_TAKEN.to_string()));
        }

        let plaintext = request.password;
        let password_hash =
            tokio::task::spawn_blocking(move || password::hash_password(&plaintext))
                .await
                .map_err(|e| ApiError::Internal(format!("Password hashing task failed: {}", e)))??;

        let user = self
            .users
            .create_user(&NewUser {
                username: request.username,
                email: request.email,
                password_hash,
            })
            .await
            .map_err(map_store_error)?;

        info!("Registered user {} with id {}", user.username, user.id);
        Ok(user)
    }

    /// Check a username/password pair
    ///
    /// An unknown username and a wrong password produce the same error.
    pub async fn login(&self, credentials: LoginCredentials) -> ApiResult<User> {
        info!("Login attempt for user: {}", credentials.username);

        let Some(user) = self
            .users
            .find_user_by_username(&credentials.username)
            .await?
        else {
            let dummy = tokio::task::spawn_blocking(dummy_hash)
                .await
                .map_err(|e| ApiError::Internal(format!("Password hashing task failed: {}", e)))??;
            verify_off_thread(credentials.password, dummy).await?;
            warn!("Login rejected, unknown user: {}", credentials.username);
            return Err(ApiError::InvalidCredentials);
        };

        let matches = verify_off_thread(credentials.password, user.password_hash.clone()).await?;

        if !matches {
            warn!("Login rejected, wrong password for user: {}", user.username);
            return Err(ApiError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Look up an account by username
    pub async fn find_user(&self, username: &str) -> ApiResult<User> {
        self.users
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("User {} not found", username)))
    }

    /// Persist a session for a token minted by the client
    pub async fn new_session(&self, new_session: NewSession) -> ApiResult<Session> {
        validation::validate_session_token(&new_session.session).map_err(ApiError::Validation)?;

        let session = self
            .sessions
            .create_session(&new_session)
            .await
            .map_err(map_store_error)?;

        info!("Session {} created for user: {:?}", session.id, session.username);
        Ok(session)
    }

    pub async fn get_session(&self, token: &str) -> ApiResult<Session> {
        self.sessions
            .find_session(token)
            .await?
            .ok_or_else(|| ApiError::NotFound("Session not found".to_string()))
    }

    /// Delete the session for a token; a token without a session is `NotFound`
    pub async fn end_session(&self, token: &str) -> ApiResult<()> {
        info!("Logout request");

        if self.sessions.delete_session(token).await? {
            Ok(())
        } else {
            Err(ApiError::NotFound("Session not found".to_string()))
        }
    }
}
