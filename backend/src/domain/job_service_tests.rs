//! Tests for the job catalog service, especially per-user removal.

use std::sync::Arc;

use chrono::NaiveDate;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::client::Client;
use crate::domain::ports::{MockClientRepository, MockJobRepository, MockOrderRepository};

fn sample_job(id: i32) -> Job {
    Job {
        id,
        title: "Logo design".to_owned(),
        category: "Design".to_owned(),
        description: "Full brand identity refresh".to_owned(),
        duration: "2-3 weeks".to_owned(),
    }
}

fn sample_client(id: i32, user_id: i32, name: &str) -> Client {
    Client {
        id,
        name: name.to_owned(),
        email: format!("{}@client.example", name.to_lowercase()),
        phone: "555-123-4567".to_owned(),
        company: None,
        address: None,
        notes: "Longstanding account with quarterly retainers.".to_owned(),
        user_id,
    }
}

fn sample_order(id: i32, user_id: i32, client_id: i32, job_id: i32, status: OrderStatus) -> Order {
    Order {
        id,
        description: "Standard engagement".to_owned(),
        rate: "$90 per hour".to_owned(),
        location: "Remote, client timezone".to_owned(),
        start_date: NaiveDate::from_ymd_opt(2026, 2, 2).expect("valid date"),
        due_date: NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date"),
        status,
        user_id,
        client_id,
        job_id,
    }
}

fn service(
    jobs: MockJobRepository,
    orders: MockOrderRepository,
    clients: MockClientRepository,
) -> JobService {
    JobService::new(Arc::new(jobs), Arc::new(orders), Arc::new(clients))
}

#[tokio::test]
async fn listing_is_anonymous_and_spans_all_users() {
    let mut jobs = MockJobRepository::new();
    jobs.expect_list().returning(|| Ok(vec![sample_job(1)]));

    let mut orders = MockOrderRepository::new();
    orders.expect_list_all().returning(|| {
        Ok(vec![
            sample_order(1, 1, 1, 1, OrderStatus::Pending),
            sample_order(2, 2, 2, 1, OrderStatus::Completed),
        ])
    });

    let mut clients = MockClientRepository::new();
    clients.expect_find_by_ids().returning(|_| {
        Ok(vec![
            sample_client(1, 1, "Mine"),
            sample_client(2, 2, "Theirs"),
        ])
    });

    let catalog = service(jobs, orders, clients)
        .list()
        .await
        .expect("listing succeeds");

    let detail = catalog.first().expect("one job");
    assert_eq!(detail.clients.len(), 2);
}

#[tokio::test]
async fn create_requires_an_authenticated_caller() {
    let error = service(
        MockJobRepository::new(),
        MockOrderRepository::new(),
        MockClientRepository::new(),
    )
    .create(
        None,
        JobDraft {
            title: "Logo design".to_owned(),
            category: "Design".to_owned(),
            description: "Full brand identity refresh".to_owned(),
            duration: "2-3 weeks".to_owned(),
        },
    )
    .await
    .expect_err("anonymous");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[tokio::test]
async fn removing_an_unknown_job_is_not_found() {
    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id().returning(|_| Ok(None));

    let error = service(jobs, MockOrderRepository::new(), MockClientRepository::new())
        .remove_for_user(Some(1), 9)
        .await
        .expect_err("missing job");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Job not found");
}

#[tokio::test]
async fn removing_a_job_the_user_never_ordered_is_not_found() {
    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .returning(|_| Ok(Some(sample_job(1))));

    let mut orders = MockOrderRepository::new();
    orders
        .expect_list_for_job_and_user()
        .returning(|_, _| Ok(vec![]));
    orders.expect_delete_for_job_and_user().times(0);

    let error = service(jobs, orders, MockClientRepository::new())
        .remove_for_user(Some(1), 1)
        .await
        .expect_err("nothing to remove");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "No orders found for this job");
}

#[tokio::test]
async fn removal_is_blocked_while_an_order_is_in_progress() {
    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .returning(|_| Ok(Some(sample_job(1))));

    let mut orders = MockOrderRepository::new();
    orders.expect_list_for_job_and_user().returning(|_, _| {
        Ok(vec![
            sample_order(1, 1, 1, 1, OrderStatus::Completed),
            sample_order(2, 1, 1, 1, OrderStatus::InProgress),
        ])
    });
    orders.expect_delete_for_job_and_user().times(0);

    let error = service(jobs, orders, MockClientRepository::new())
        .remove_for_user(Some(1), 1)
        .await
        .expect_err("active order blocks removal");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), "Cannot remove job with active orders!");
}

#[tokio::test]
async fn removal_deletes_only_the_callers_orders_and_returns_the_snapshot() {
    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .returning(|_| Ok(Some(sample_job(1))));

    let mut orders = MockOrderRepository::new();
    orders
        .expect_list_for_job_and_user()
        .returning(|_, _| Ok(vec![sample_order(1, 1, 1, 1, OrderStatus::Completed)]));
    orders
        .expect_list_for_job()
        .returning(|_| Ok(vec![sample_order(1, 1, 1, 1, OrderStatus::Completed)]));
    orders
        .expect_delete_for_job_and_user()
        .withf(|job_id, user_id| *job_id == 1 && *user_id == 1)
        .times(1)
        .returning(|_, _| Ok(1));

    let mut clients = MockClientRepository::new();
    clients
        .expect_find_by_ids()
        .returning(|_| Ok(vec![sample_client(1, 1, "Mine")]));

    let snapshot = service(jobs, orders, clients)
        .remove_for_user(Some(1), 1)
        .await
        .expect("removal succeeds");

    assert_eq!(snapshot.id, 1);
    assert_eq!(snapshot.title, "Logo design");
}

#[tokio::test]
async fn update_with_an_invalid_title_is_rejected() {
    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .returning(|_| Ok(Some(sample_job(1))));
    jobs.expect_update().times(0);

    let error = service(jobs, MockOrderRepository::new(), MockClientRepository::new())
        .update(
            Some(1),
            1,
            JobPatch {
                title: Some("Logo".to_owned()),
                ..JobPatch::default()
            },
        )
        .await
        .expect_err("short title");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}
