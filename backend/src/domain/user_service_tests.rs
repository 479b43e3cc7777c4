//! Tests for the user account service.

use std::sync::Arc;

use super::*;
use crate::domain::{ErrorCode, FieldErrors};
use crate::domain::ports::{
    MockClientRepository, MockJobRepository, MockOrderRepository, MockPasswordHasher,
    MockUserRepository, UserDuplicateField, UserRepositoryError,
};

fn sample_user() -> User {
    User {
        id: 1,
        username: "alice".to_owned(),
        email: "alice@example.com".to_owned(),
        password_digest: "$2b$12$stored-digest".to_owned(),
    }
}

fn sample_registration() -> NewUser {
    NewUser {
        username: "alice".to_owned(),
        email: "alice@example.com".to_owned(),
        password: "longenough".to_owned(),
    }
}

fn expect_empty_relations(
    clients: &mut MockClientRepository,
    orders: &mut MockOrderRepository,
    jobs: &mut MockJobRepository,
) {
    clients.expect_list_for_user().returning(|_| Ok(vec![]));
    orders.expect_list_for_user().returning(|_| Ok(vec![]));
    jobs.expect_find_by_ids().returning(|_| Ok(vec![]));
}

fn service(
    users: MockUserRepository,
    clients: MockClientRepository,
    jobs: MockJobRepository,
    orders: MockOrderRepository,
    hasher: MockPasswordHasher,
) -> UserService {
    UserService::new(
        Arc::new(users),
        Arc::new(clients),
        Arc::new(jobs),
        Arc::new(orders),
        Arc::new(hasher),
    )
}

#[tokio::test]
async fn register_hashes_the_password_and_returns_a_profile() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().returning(|_| Ok(None));
    users.expect_find_by_username().returning(|_| Ok(None));
    users
        .expect_insert()
        .withf(|record| {
            record.username == "alice" && record.password_digest == "fresh-digest"
        })
        .times(1)
        .returning(|_| Ok(sample_user()));

    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .times(1)
        .returning(|_| Ok("fresh-digest".to_owned()));

    let mut clients = MockClientRepository::new();
    let mut orders = MockOrderRepository::new();
    let mut jobs = MockJobRepository::new();
    expect_empty_relations(&mut clients, &mut orders, &mut jobs);

    let profile = service(users, clients, jobs, orders, hasher)
        .register(sample_registration())
        .await
        .expect("registration succeeds");

    assert_eq!(profile.id, 1);
    assert_eq!(profile.username, "alice");
    assert!(profile.clients.is_empty());
    assert!(profile.jobs.is_empty());
}

#[tokio::test]
async fn register_rejects_invalid_payload_before_touching_any_port() {
    let svc = service(
        MockUserRepository::new(),
        MockClientRepository::new(),
        MockJobRepository::new(),
        MockOrderRepository::new(),
        MockPasswordHasher::new(),
    );

    let error = svc
        .register(NewUser {
            username: "a".to_owned(),
            email: "bad".to_owned(),
            password: "short".to_owned(),
        })
        .await
        .expect_err("invalid payload");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.field_errors().map(FieldErrors::len), Some(3));
}

#[tokio::test]
async fn register_fast_path_rejects_a_taken_email() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .returning(|_| Ok(Some(sample_user())));

    let error = service(
        users,
        MockClientRepository::new(),
        MockJobRepository::new(),
        MockOrderRepository::new(),
        MockPasswordHasher::new(),
    )
    .register(sample_registration())
    .await
    .expect_err("duplicate email");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), "Email already exists");
}

#[tokio::test]
async fn register_surfaces_the_store_constraint_when_the_race_is_lost() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().returning(|_| Ok(None));
    users.expect_find_by_username().returning(|_| Ok(None));
    users.expect_insert().returning(|_| {
        Err(UserRepositoryError::Duplicate {
            field: UserDuplicateField::Email,
        })
    });

    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .returning(|_| Ok("fresh-digest".to_owned()));

    let error = service(
        users,
        MockClientRepository::new(),
        MockJobRepository::new(),
        MockOrderRepository::new(),
        hasher,
    )
    .register(sample_registration())
    .await
    .expect_err("constraint violation");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), "Email already exists");
}

#[tokio::test]
async fn authenticate_unknown_username_is_unauthorized() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| Ok(None));

    let error = service(
        users,
        MockClientRepository::new(),
        MockJobRepository::new(),
        MockOrderRepository::new(),
        MockPasswordHasher::new(),
    )
    .authenticate("nobody", "whatever")
    .await
    .expect_err("unknown user");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[tokio::test]
async fn authenticate_wrong_password_is_unauthorized() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .returning(|_| Ok(Some(sample_user())));

    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().returning(|_, _| Ok(false));

    let error = service(
        users,
        MockClientRepository::new(),
        MockJobRepository::new(),
        MockOrderRepository::new(),
        hasher,
    )
    .authenticate("alice", "wrong")
    .await
    .expect_err("bad password");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), "Invalid credentials");
}

#[tokio::test]
async fn authenticate_success_returns_the_profile() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .returning(|_| Ok(Some(sample_user())));

    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().returning(|_, _| Ok(true));

    let mut clients = MockClientRepository::new();
    let mut orders = MockOrderRepository::new();
    let mut jobs = MockJobRepository::new();
    expect_empty_relations(&mut clients, &mut orders, &mut jobs);

    let profile = service(users, clients, jobs, orders, hasher)
        .authenticate("alice", "correct")
        .await
        .expect("login succeeds");

    assert_eq!(profile.email, "alice@example.com");
}

#[tokio::test]
async fn fetch_missing_user_is_not_found() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|_| Ok(None));

    let error = service(
        users,
        MockClientRepository::new(),
        MockJobRepository::new(),
        MockOrderRepository::new(),
        MockPasswordHasher::new(),
    )
    .fetch(42)
    .await
    .expect_err("missing user");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn delete_by_another_user_is_forbidden() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|_| Ok(Some(sample_user())));
    users.expect_delete_cascade().times(0);

    let error = service(
        users,
        MockClientRepository::new(),
        MockJobRepository::new(),
        MockOrderRepository::new(),
        MockPasswordHasher::new(),
    )
    .delete(Some(2), 1)
    .await
    .expect_err("not the owner");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn delete_returns_the_snapshot_and_cascades() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|_| Ok(Some(sample_user())));
    users
        .expect_delete_cascade()
        .times(1)
        .returning(|_| Ok(Some(sample_user())));

    let mut clients = MockClientRepository::new();
    let mut orders = MockOrderRepository::new();
    let mut jobs = MockJobRepository::new();
    expect_empty_relations(&mut clients, &mut orders, &mut jobs);

    let snapshot = service(users, clients, jobs, orders, MockPasswordHasher::new())
        .delete(Some(1), 1)
        .await
        .expect("self delete succeeds");

    assert_eq!(snapshot.id, 1);
    assert_eq!(snapshot.username, "alice");
}
