//! Session repository against a real PostgreSQL instance
//!
//! Needs `DATABASE_URL`; run with `cargo test -- --ignored`.

use common::database::{DatabaseConfig, init_pool, run_migrations};
use watchlog::{
    models::NewSession,
    repositories::{SessionRepository, SessionStore},
};

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_session_rows_map_onto_session() -> Result<(), Box<dyn std::error::Error>> {
    let pool = init_pool(&DatabaseConfig::from_env()?).await?;
    run_migrations(&pool).await?;
    let sessions = SessionRepository::new(pool);

    let token = format!("repo-{}", std::process::id());
    let created = sessions
        .create_session(&NewSession {
            session: token.clone(),
            username: Some("alice".to_string()),
        })
        .await?;
    assert_eq!(created.session, token);
    assert_eq!(created.username.as_deref(), Some("alice"));

    let found = sessions
        .find_session(&token)
        .await?
        .expect("session just created");
    assert_eq!(found.id, created.id);
    assert_eq!(found.created_at, created.created_at);

    assert!(sessions.delete_session(&token).await?);
    assert!(sessions.find_session(&token).await?.is_none());
    assert!(!sessions.delete_session(&token).await?);

    Ok(())
}
