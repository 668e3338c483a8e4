//! Business logic on top of the stores

pub mod activity;
pub mod auth;

pub use activity::ActivityService;
pub use auth::AuthService;
