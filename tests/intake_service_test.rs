//! Tests for subscription and contact intake.

use std::sync::Arc;

use futures::future::join_all;
use quest_site::repository::table::Table;
use quest_site::repository::table::TableBase;
use quest_site::service::contact_service::ContactForm;
use quest_site::service::contact_service::ContactService;
use quest_site::service::error::ServiceError;
use quest_site::service::subscription_service::ALREADY_SUBSCRIBED;
use quest_site::service::subscription_service::SubscriptionForm;
use quest_site::service::subscription_service::SubscriptionService;

mod common;

fn email(value: &str) -> SubscriptionForm {
    SubscriptionForm {
        email: Some(value.to_string()),
    }
}

#[tokio::test]
async fn test_subscribe_then_duplicate_conflicts() {
    let repo = common::setup_repo().await;
    let service = SubscriptionService::new(repo.clone());

    let created = service
        .subscribe(&email("a@x.com"))
        .await
        .expect("First subscribe failed");
    assert_eq!(created.email, "a@x.com");
    assert!(service.is_subscribed("a@x.com").await.unwrap());

    match service.subscribe(&email("a@x.com")).await {
        Err(ServiceError::Conflict { message }) => assert_eq!(message, ALREADY_SUBSCRIBED),
        other => panic!("Expected conflict, got {other:?}"),
    }

    let all = repo.subscription.select_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, created.id);
}

#[tokio::test]
async fn test_subscribe_duplicate_ignores_case_and_padding() {
    let repo = common::setup_repo().await;
    let service = SubscriptionService::new(repo.clone());

    service.subscribe(&email("a@x.com")).await.unwrap();
    let err = service.subscribe(&email("  A@X.COM ")).await.unwrap_err();
    assert!(matches!(err, ServiceError::Conflict { .. }));
    assert_eq!(repo.subscription.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_subscribe_rejects_invalid_email() {
    let repo = common::setup_repo().await;
    let service = SubscriptionService::new(repo.clone());

    for bad in [SubscriptionForm { email: None }, email(""), email("nope"), email("a@x")] {
        match service.subscribe(&bad).await {
            Err(ServiceError::Validation { field, message }) => {
                assert_eq!(field, "email");
                assert_eq!(message, "Invalid email address");
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }
    assert_eq!(repo.subscription.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_concurrent_subscriptions_store_one() {
    let repo = common::setup_repo().await;
    let service = Arc::new(SubscriptionService::new(repo.clone()));

    let attempts = (0..16).map(|_| {
        let service = service.clone();
        tokio::spawn(async move { service.subscribe(&email("race@x.com")).await })
    });
    let results = join_all(attempts).await;

    let successes = results
        .into_iter()
        .map(|r| r.expect("Task panicked"))
        .filter(|r| r.is_ok())
        .count();
    assert_eq!(successes, 1);
    assert_eq!(repo.subscription.count().await.unwrap(), 1);
}

fn contact_form() -> ContactForm {
    ContactForm {
        name: Some("Ji-Young Park".to_string()),
        email: Some("park@x.com".to_string()),
        phone: Some("  ".to_string()),
        company: Some("ACME".to_string()),
        subject: Some("Labor question".to_string()),
        message: Some("Can we talk next week?".to_string()),
    }
}

#[tokio::test]
async fn test_contact_submit_stores_trimmed_fields() {
    let repo = common::setup_repo().await;
    let service = ContactService::new(repo.clone());

    let contact = service.submit(&contact_form()).await.expect("Submit failed");
    assert_eq!(contact.name, "Ji-Young Park");
    assert_eq!(contact.phone, None);
    assert_eq!(contact.company.as_deref(), Some("ACME"));

    let stored = repo.contact.select(&contact.id).await.unwrap().unwrap();
    assert_eq!(stored, contact);
}

#[tokio::test]
async fn test_contact_requires_name() {
    let repo = common::setup_repo().await;
    let service = ContactService::new(repo.clone());

    let form = ContactForm {
        name: None,
        ..contact_form()
    };
    match service.submit(&form).await {
        Err(ServiceError::Validation { field, message }) => {
            assert_eq!(field, "name");
            assert_eq!(message, "Name is required");
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
    assert_eq!(repo.contact.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_contact_allows_repeat_submissions() {
    let repo = common::setup_repo().await;
    let service = ContactService::new(repo.clone());

    service.submit(&contact_form()).await.unwrap();
    service.submit(&contact_form()).await.unwrap();
    assert_eq!(repo.contact.count().await.unwrap(), 2);
}
