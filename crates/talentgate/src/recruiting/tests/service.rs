use serde_json::Value;

use super::common::*;
use crate::recruiting::domain::{ApplicationId, ApplicationStatus, DecisionRequest};
use crate::recruiting::repository::RepositoryError;
use crate::recruiting::service::{ServiceError, APPLICATION_CREATED, APPLICATION_UPDATED};

#[tokio::test]
async fn submit_stores_record_as_new_and_announces_it() {
    let (service, hub) = service_with_hub();
    let (_conn, mut rx) = hub
        .connect(crate::realtime::Identity {
            id: 9,
            display_name: "Reviewer".to_string(),
        })
        .await;

    let record = service
        .submit(submission("Ana", "Suarez"))
        .await
        .expect("submission stores");

    assert_eq!(record.status, ApplicationStatus::New);
    assert!(record.decided_at.is_none());

    let frame = rx.try_recv().expect("creation event delivered");
    let event: Value = serde_json::from_str(&frame).expect("valid JSON");
    assert_eq!(event["type"], APPLICATION_CREATED);
    assert_eq!(event["payload"]["id"], record.id.0);
    assert_eq!(event["payload"]["status"], "new");
}

#[tokio::test]
async fn decide_updates_status_and_announces_it() {
    let (service, hub) = service_with_hub();
    let record = service
        .submit(submission("Beto", "Gomez"))
        .await
        .expect("submission stores");

    let (_conn, mut rx) = hub
        .connect(crate::realtime::Identity {
            id: 9,
            display_name: "Reviewer".to_string(),
        })
        .await;

    let decided = service
        .decide(
            record.id,
            DecisionRequest {
                status: "highlighted".to_string(),
                note: Some("strong profile".to_string()),
                reviewer_id: Some(9),
            },
        )
        .await
        .expect("decision applies");

    assert_eq!(decided.status, ApplicationStatus::Highlighted);
    assert!(decided.decided_at.is_some());
    assert_eq!(decided.decided_by, Some(9));

    let frame = rx.try_recv().expect("update event delivered");
    let event: Value = serde_json::from_str(&frame).expect("valid JSON");
    assert_eq!(event["type"], APPLICATION_UPDATED);
    assert_eq!(event["payload"]["status"], "highlighted");
}

#[tokio::test]
async fn decide_rejects_statuses_outside_the_closed_set() {
    let (service, _hub) = service_with_hub();
    let record = service
        .submit(submission("Carla", "Paz"))
        .await
        .expect("submission stores");

    match service
        .decide(
            record.id,
            DecisionRequest {
                status: "archived".to_string(),
                note: None,
                reviewer_id: None,
            },
        )
        .await
    {
        Err(ServiceError::UnknownStatus(raw)) => assert_eq!(raw, "archived"),
        other => panic!("expected unknown status error, got {other:?}"),
    }
}

#[tokio::test]
async fn remove_deletes_and_announces() {
    let (service, hub) = service_with_hub();
    let record = service
        .submit(submission("Dario", "Luna"))
        .await
        .expect("submission stores");

    let (_conn, mut rx) = hub
        .connect(crate::realtime::Identity {
            id: 9,
            display_name: "Reviewer".to_string(),
        })
        .await;

    service.remove(record.id).await.expect("removal succeeds");

    let frame = rx.try_recv().expect("deletion event delivered");
    let event: Value = serde_json::from_str(&frame).expect("valid JSON");
    assert_eq!(event["type"], "APPLICATION_DELETED");
    assert_eq!(event["payload"]["id"], record.id.0);

    match service.get(record.id) {
        Err(ServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found after removal, got {other:?}"),
    }
}

#[tokio::test]
async fn get_propagates_not_found() {
    let (service, _hub) = service_with_hub();
    match service.get(ApplicationId(424242)) {
        Err(ServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found error, got {other:?}"),
    }
}

#[tokio::test]
async fn counts_tally_by_status() {
    let (service, _hub) = service_with_hub();
    let first = service
        .submit(submission("Elsa", "Mori"))
        .await
        .expect("stores");
    service
        .submit(submission("Fede", "Rios"))
        .await
        .expect("stores");
    service
        .decide(
            first.id,
            DecisionRequest {
                status: "discarded".to_string(),
                note: None,
                reviewer_id: None,
            },
        )
        .await
        .expect("decision applies");

    let counts = service.counts().expect("counts build");
    assert_eq!(counts.new, 1);
    assert_eq!(counts.discarded, 1);
    assert_eq!(counts.total, 2);
}
