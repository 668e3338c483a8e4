//! Application state shared across handlers

use std::sync::Arc;

use crate::{
    repositories::{MemoryStore, MovieStore, SessionStore, UserStore},
    services::{ActivityService, AuthService},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub activity_service: ActivityService,
}

impl AppState {
    /// Wire the services to explicitly constructed store handles
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        movies: Arc<dyn MovieStore>,
    ) -> Self {
        Self {
            auth_service: AuthService::new(users, sessions),
            activity_service: ActivityService::new(movies),
        }
    }

    /// State backed by a single in-memory store
    pub fn in_memory(store: MemoryStore) -> Self {
        Self::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
        )
    }
}
