use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::realtime::NotificationHub;

use super::domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus, ApplicationSubmission, DecisionRequest,
    StatusCounts,
};
use super::repository::{ApplicationRepository, RepositoryError};

/// Domain event emitted when a candidate submits an application.
pub const APPLICATION_CREATED: &str = "APPLICATION_CREATED";
/// Domain event emitted when a reviewer changes an application's status.
pub const APPLICATION_UPDATED: &str = "APPLICATION_UPDATED";
/// Domain event emitted when an application is removed.
pub const APPLICATION_DELETED: &str = "APPLICATION_DELETED";

static APPLICATION_SEQUENCE: AtomicI64 = AtomicI64::new(1);

fn next_application_id() -> ApplicationId {
    ApplicationId(APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed))
}

/// Service composing the repository with the notification hub: every state
/// change is persisted first and then announced to connected clients,
/// fire-and-forget.
pub struct RecruitingService<R> {
    repository: Arc<R>,
    hub: Arc<NotificationHub>,
}

impl<R> RecruitingService<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(repository: Arc<R>, hub: Arc<NotificationHub>) -> Self {
        Self { repository, hub }
    }

    /// Store a new submission and announce it. New applications always enter
    /// the pipeline as `new`.
    pub async fn submit(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<ApplicationRecord, ServiceError> {
        let record = ApplicationRecord {
            id: next_application_id(),
            submission,
            status: ApplicationStatus::New,
            created_at: Utc::now(),
            decided_at: None,
            decided_by: None,
            decision_note: None,
        };

        let stored = self.repository.insert(record)?;
        self.hub
            .broadcast(
                APPLICATION_CREATED,
                json!({ "id": stored.id, "status": stored.status.label() }),
            )
            .await;
        Ok(stored)
    }

    /// Apply a reviewer decision and announce the new status.
    pub async fn decide(
        &self,
        id: ApplicationId,
        decision: DecisionRequest,
    ) -> Result<ApplicationRecord, ServiceError> {
        let status = ApplicationStatus::parse(&decision.status)
            .ok_or_else(|| ServiceError::UnknownStatus(decision.status.clone()))?;

        let mut record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        record.status = status;
        record.decided_at = Some(Utc::now());
        record.decided_by = decision.reviewer_id;
        record.decision_note = decision.note;

        self.repository.update(record.clone())?;
        self.hub
            .broadcast(
                APPLICATION_UPDATED,
                json!({ "id": record.id, "status": record.status.label() }),
            )
            .await;
        Ok(record)
    }

    /// Delete an application and announce the removal.
    pub async fn remove(&self, id: ApplicationId) -> Result<(), ServiceError> {
        self.repository.remove(id)?;
        self.hub
            .broadcast(APPLICATION_DELETED, json!({ "id": id }))
            .await;
        Ok(())
    }

    pub fn get(&self, id: ApplicationId) -> Result<ApplicationRecord, ServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn list(&self) -> Result<Vec<ApplicationRecord>, ServiceError> {
        let mut records = self.repository.list()?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    /// Per-status totals for the review dashboard.
    pub fn counts(&self) -> Result<StatusCounts, ServiceError> {
        let mut counts = StatusCounts::default();
        for record in self.repository.list()? {
            counts.total += 1;
            match record.status {
                ApplicationStatus::New => counts.new += 1,
                ApplicationStatus::Highlighted => counts.highlighted += 1,
                ApplicationStatus::Possible => counts.possible += 1,
                ApplicationStatus::Discarded => counts.discarded += 1,
            }
        }
        Ok(counts)
    }
}

/// Error raised by the recruiting service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("unknown application status '{0}'")]
    UnknownStatus(String),
}
