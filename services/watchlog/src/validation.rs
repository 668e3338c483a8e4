//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

/// Highest rating a user can give
pub const MAX_RATING: i32 = 10;

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }

    if username.len() < 3 {
        return Err("Username must be at least 3 characters long".to_string());
    }

    if username.len() > 32 {
        return Err("Username must be at most 32 characters long".to_string());
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("Failed to compile username regex"));

    if !regex.is_match(username) {
        return Err("Username can only contain letters, numbers, and underscores".to_string());
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate password
///
/// Only presence and length are checked; strength rules are left to clients.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

/// Validate a client-chosen session token
pub fn validate_session_token(token: &str) -> Result<(), String> {
    if token.trim().is_empty() {
        return Err("Session token is required".to_string());
    }

    if token.len() > 255 {
        return Err("Session token must be at most 255 characters long".to_string());
    }

    Ok(())
}

/// Validate the catalog id and rating of a new movie entry
pub fn validate_movie(tmdb_id: i64, rating: i32) -> Result<(), String> {
    if tmdb_id <= 0 {
        return Err("TMDB id must be a positive number".to_string());
    }

    if !(0..=MAX_RATING).contains(&rating) {
        return Err(format!("Rating must be between 0 and {}", MAX_RATING));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("movie_fan_42").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("al").is_err());
        assert!(validate_username(&"a".repeat(33)).is_err());
        assert!(validate_username("alice smith").is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a@x").is_err());
    }

    #[test]
    fn test_short_passwords_are_allowed() {
        assert!(validate_password("pw1").is_ok());
        assert!(validate_password("").is_err());
        assert!(validate_password(&"p".repeat(129)).is_err());
    }

    #[test]
    fn test_session_token_rules() {
        assert!(validate_session_token("tok123").is_ok());
        assert!(validate_session_token("   ").is_err());
        assert!(validate_session_token(&"t".repeat(256)).is_err());
    }

    #[test]
    fn test_movie_rules() {
        assert!(validate_movie(550, 5).is_ok());
        assert!(validate_movie(550, 0).is_ok());
        assert!(validate_movie(550, MAX_RATING).is_ok());
        assert!(validate_movie(0, 5).is_err());
        assert!(validate_movie(550, -1).is_err());
        assert!(validate_movie(550, MAX_RATING + 1).is_err());
    }
}
