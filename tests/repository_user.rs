mod common;

use linkvault::domain::entities::{NewUser, UserPatch};
use linkvault::domain::repositories::UserRepository;
use linkvault::error::AppError;
use linkvault::infrastructure::persistence::PgUserRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_user(username: &str, email: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
    }
}

#[sqlx::test]
async fn test_create_user(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let user = repo
        .create(new_user("alice", "alice@example.com"))
        .await
        .unwrap();

    assert!(user.id > 0);
    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");
    assert!(user.active);
    assert!(user.first_name.is_none());
    assert!(user.last_name.is_none());
}

#[sqlx::test]
async fn test_create_duplicate_username(pool: PgPool) {
    common::create_test_user(&pool, "alice", "alice@example.com").await;
    let repo = PgUserRepository::new(Arc::new(pool));

    let result = repo.create(new_user("alice", "other@example.com")).await;

    match result {
        Err(AppError::Conflict { message, .. }) => {
            assert_eq!(message, "Username already registered")
        }
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[sqlx::test]
async fn test_create_duplicate_email(pool: PgPool) {
    common::create_test_user(&pool, "alice", "alice@example.com").await;
    let repo = PgUserRepository::new(Arc::new(pool));

    let result = repo.create(new_user("bob", "alice@example.com")).await;

    match result {
        Err(AppError::Conflict { message, .. }) => assert_eq!(message, "Email already registered"),
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[sqlx::test]
async fn test_find_by_username_and_email(pool: PgPool) {
    let id = common::create_test_user(&pool, "alice", "alice@example.com").await;
    let repo = PgUserRepository::new(Arc::new(pool));

    let by_name = repo.find_by_username("alice").await.unwrap().unwrap();
    assert_eq!(by_name.id, id);

    let by_email = repo
        .find_by_email("alice@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, id);

    assert!(repo.find_by_username("Alice").await.unwrap().is_none());
    assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_update_profile_partial(pool: PgPool) {
    let id = common::create_test_user(&pool, "alice", "alice@example.com").await;
    let repo = PgUserRepository::new(Arc::new(pool));

    let user = repo
        .update_profile(
            id,
            UserPatch {
                first_name: Some(Some("Alice".to_string())),
                last_name: Some(Some("Liddell".to_string())),
            },
        )
        .await
        .unwrap();
    assert_eq!(user.first_name.as_deref(), Some("Alice"));
    assert_eq!(user.last_name.as_deref(), Some("Liddell"));

    // Only last_name is touched; first_name keeps its value.
    let user = repo
        .update_profile(
            id,
            UserPatch {
                first_name: None,
                last_name: Some(None),
            },
        )
        .await
        .unwrap();
    assert_eq!(user.first_name.as_deref(), Some("Alice"));
    assert!(user.last_name.is_none());
    assert!(user.updated_at >= user.created_at);
}

#[sqlx::test]
async fn test_update_profile_unknown_user(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let result = repo.update_profile(9999, UserPatch::default()).await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
async fn test_set_active(pool: PgPool) {
    common::create_test_user(&pool, "alice", "alice@example.com").await;
    let repo = PgUserRepository::new(Arc::new(pool));

    assert!(repo.set_active("alice", false).await.unwrap());
    let user = repo.find_by_username("alice").await.unwrap().unwrap();
    assert!(!user.active);

    assert!(repo.set_active("alice", true).await.unwrap());
    let user = repo.find_by_username("alice").await.unwrap().unwrap();
    assert!(user.active);

    assert!(!repo.set_active("nobody", false).await.unwrap());
}

#[sqlx::test]
async fn test_list_users_paginated(pool: PgPool) {
    for i in 0..5 {
        common::create_test_user(&pool, &format!("user{i}"), &format!("user{i}@example.com")).await;
    }
    let repo = PgUserRepository::new(Arc::new(pool));

    let first = repo.list(0, 2).await.unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].username, "user0");
    assert_eq!(first[1].username, "user1");

    let rest = repo.list(2, 10).await.unwrap();
    assert_eq!(rest.len(), 3);
    assert_eq!(rest[0].username, "user2");
}

#[sqlx::test]
async fn test_ping(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    assert!(repo.ping().await.is_ok());
}
