//! SeaORM-backed store against an in-memory SQLite database.

use std::sync::Arc;
use std::time::Duration;

use common::AppError;
use domain::{CreateUser, UpdateUser, User, UserPrimitives};
use user_service_lib::infra::Database;
use user_service_lib::repository::{UserRepository, UserStore};
use user_service_lib::service::{UserManager, UserService};

async fn store() -> UserStore {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    UserStore::new(db.get_connection())
}

fn user(name: &str, email: &str) -> User {
    User::create(name, email, Some("555-0100"), "pw").unwrap()
}

#[tokio::test]
async fn test_save_and_reload_round_trips_every_field() {
    let store = store().await;
    let alice = user("Alice", "alice@example.com");

    store.save(&alice).await.unwrap();
    let loaded = store.find_by_id(alice.id()).await.unwrap().unwrap();

    assert_eq!(loaded.to_primitives(), alice.to_primitives());
    assert!(loaded.verify_password("pw"));
}

#[tokio::test]
async fn test_find_by_email_normalizes_lookup() {
    let store = store().await;
    let alice = user("Alice", "alice@example.com");
    store.save(&alice).await.unwrap();

    let found = store.find_by_email(" Alice@Example.COM").await.unwrap();
    assert_eq!(found.map(|u| u.id()), Some(alice.id()));
    assert!(store.find_by_email("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_unique_email_index_maps_to_conflict() {
    let store = store().await;
    store.save(&user("Alice", "alice@example.com")).await.unwrap();

    let result = store.save(&user("Other", "alice@example.com")).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_find_all_newest_first() {
    let store = store().await;

    let mut ids = Vec::new();
    for (name, email) in [("A", "a@example.com"), ("B", "b@example.com"), ("C", "c@example.com")] {
        let u = user(name, email);
        store.save(&u).await.unwrap();
        ids.push(u.id());
        tokio::time::sleep(Duration::from_millis(2)).await;
    }

    let listed: Vec<_> = store.find_all().await.unwrap().iter().map(|u| u.id()).collect();
    ids.reverse();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn test_find_all_breaks_timestamp_ties_by_id() {
    let store = store().await;

    let mut expected = Vec::new();
    for name in ["a", "b", "c", "d"] {
        let u = User::from_primitives(UserPrimitives {
            created_at: "2024-01-01T00:00:00.000000Z".to_string(),
            ..user(name, &format!("{}@example.com", name)).to_primitives()
        })
        .unwrap();
        store.save(&u).await.unwrap();
        expected.push(u.id());
    }
    expected.sort_by(|a, b| b.cmp(a));

    let listed: Vec<_> = store.find_all().await.unwrap().iter().map(|u| u.id()).collect();
    assert_eq!(listed, expected);
}

#[tokio::test]
async fn test_update_and_delete() {
    let store = store().await;
    let mut alice = user("Alice", "alice@example.com");
    store.save(&alice).await.unwrap();

    alice.set_name("Alicia").unwrap();
    alice.set_phone(None);
    store.update(&alice).await.unwrap();

    let loaded = store.find_by_id(alice.id()).await.unwrap().unwrap();
    assert_eq!(loaded.name(), "Alicia");
    assert_eq!(loaded.phone(), None);

    store.delete(alice.id()).await.unwrap();
    assert!(store.find_by_id(alice.id()).await.unwrap().is_none());
    store.delete(alice.id()).await.unwrap();
}

#[tokio::test]
async fn test_service_over_sql_store() {
    let service = UserManager::new(Arc::new(store().await));

    let created = service
        .create_user(CreateUser {
            name: "Alice".to_string(),
            email: "ALICE@example.com".to_string(),
            phone: None,
            password: "pw".to_string(),
        })
        .await
        .unwrap();

    let changes = UpdateUser {
        email: Some("alice@new.example.com".to_string()),
        ..Default::default()
    };
    let updated = service
        .update_user(created.id(), changes)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.email(), "alice@new.example.com");
    assert_eq!(service.list_users().await.unwrap().len(), 1);
}
