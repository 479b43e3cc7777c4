//! Behaviour coverage for the derived relation views.

use chrono::NaiveDate;

use super::*;

fn user(id: i32, username: &str) -> User {
    User {
        id,
        username: username.to_owned(),
        email: format!("{username}@example.com"),
        password_digest: "$2b$12$fixture".to_owned(),
    }
}

fn client(id: i32, user_id: i32, name: &str) -> Client {
    Client {
        id,
        name: name.to_owned(),
        email: format!("{}@client.example", name.to_lowercase().replace(' ', ".")),
        phone: "555-123-4567".to_owned(),
        company: None,
        address: None,
        notes: "Repeat client, pays on time, prefers email contact.".to_owned(),
        user_id,
    }
}

fn job(id: i32, title: &str) -> Job {
    Job {
        id,
        title: title.to_owned(),
        category: "Design".to_owned(),
        description: "A representative catalog entry".to_owned(),
        duration: "2 weeks".to_owned(),
    }
}

fn order(id: i32, user_id: i32, client_id: i32, job_id: i32) -> Order {
    Order {
        id,
        description: "Standard engagement".to_owned(),
        rate: "$90 per hour".to_owned(),
        location: "Remote, client timezone".to_owned(),
        start_date: NaiveDate::from_ymd_opt(2026, 2, 2).expect("valid date"),
        due_date: NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date"),
        status: OrderStatus::Pending,
        user_id,
        client_id,
        job_id,
    }
}

#[test]
fn same_job_through_two_clients_appears_once_with_both_clients() {
    let jobs = vec![job(1, "Logo design")];
    let clients = vec![client(1, 1, "Acme"), client(2, 1, "Globex")];
    let orders = vec![order(1, 1, 1, 1), order(2, 1, 2, 1)];

    let details = jobs_for_user(1, &orders, &jobs, &clients);

    assert_eq!(details.len(), 1);
    let detail = details.first().expect("one job");
    assert_eq!(detail.id, 1);
    assert_eq!(detail.clients.len(), 2);
}

#[test]
fn user_with_no_orders_gets_empty_job_list() {
    let jobs = vec![job(1, "Logo design")];
    let clients = vec![client(1, 1, "Acme")];

    assert!(jobs_for_user(1, &[], &jobs, &clients).is_empty());
}

#[test]
fn other_users_clients_never_leak_into_the_annotation() {
    let jobs = vec![job(1, "Logo design")];
    let clients = vec![client(1, 1, "Mine"), client(2, 2, "Theirs")];
    // Both users ordered the same job through their own client.
    let orders = vec![order(1, 1, 1, 1), order(2, 2, 2, 1)];

    let details = jobs_for_user(1, &orders, &jobs, &clients);

    let detail = details.first().expect("one job");
    assert_eq!(detail.clients.len(), 1);
    assert_eq!(
        detail.clients.first().map(|c| c.name.as_str()),
        Some("Mine")
    );
}

#[test]
fn repeat_orders_on_one_client_collapse_to_one_summary() {
    let jobs = vec![job(1, "Logo design"), job(2, "Copywriting")];
    let orders = vec![order(1, 1, 7, 1), order(2, 1, 7, 1), order(3, 1, 7, 2)];

    let summaries = jobs_for_client(7, &orders, &jobs);

    assert_eq!(summaries.len(), 2);
}

#[test]
fn job_client_list_can_be_scoped_to_one_user() {
    let clients = vec![client(1, 1, "Mine"), client(2, 2, "Theirs")];
    let orders = vec![order(1, 1, 1, 9), order(2, 2, 2, 9)];

    let unscoped = clients_for_job(9, &orders, &clients, None);
    assert_eq!(unscoped.len(), 2);

    let scoped = clients_for_job(9, &orders, &clients, Some(2));
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped.first().map(|c| c.name.as_str()), Some("Theirs"));
}

#[test]
fn order_detail_requires_both_references() {
    let o = order(1, 1, 1, 1);
    let clients = vec![client(1, 1, "Acme")];
    let jobs = vec![job(1, "Logo design")];

    assert!(order_detail(&o, &clients, &jobs).is_some());
    assert!(order_detail(&o, &[], &jobs).is_none());
    assert!(order_detail(&o, &clients, &[]).is_none());
}

#[test]
fn profile_never_serializes_the_digest() {
    let u = user(1, "alice");
    let clients = vec![client(1, 1, "Acme")];
    let jobs = vec![job(1, "Logo design")];
    let orders = vec![order(1, 1, 1, 1)];

    let profile = user_profile(&u, &clients, &orders, &jobs).expect("consistent rows");
    let value = serde_json::to_value(&profile).expect("profile serializes");

    let rendered = value.to_string();
    assert!(!rendered.contains("password"));
    assert!(!rendered.contains("fixture"));
    assert_eq!(value["jobs"][0]["clients"][0]["name"], "Acme");
    assert_eq!(value["orders"][0]["status"], "pending");
}

#[test]
fn profile_with_inconsistent_order_is_a_storage_failure() {
    let u = user(1, "alice");
    let orders = vec![order(1, 1, 42, 1)];
    let jobs = vec![job(1, "Logo design")];

    let error = user_profile(&u, &[], &orders, &jobs).expect_err("dangling client");
    assert_eq!(
        error.code(),
        crate::domain::error::ErrorCode::StorageFailure
    );
}
