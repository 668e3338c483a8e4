//! Watchlog models

pub mod movie;
pub mod session;
pub mod user;

// Re-export for convenience
pub use movie::{Movie, NewMovie};
pub use session::{NewSession, Session};
pub use user::{LoginCredentials, NewUser, RegisterRequest, User, UserLookup};
