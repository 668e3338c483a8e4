//! Watchlog: accounts, client-issued sessions and a per-user log of watched movies

pub mod config;
pub mod error;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;

pub use routes::create_router;
pub use state::AppState;
