use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::realtime::NotificationHub;
use crate::recruiting::domain::{ApplicationId, ApplicationRecord, ApplicationSubmission};
use crate::recruiting::repository::{ApplicationRepository, RepositoryError};
use crate::recruiting::service::RecruitingService;

/// In-memory repository test double.
#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<HashMap<ApplicationId, ApplicationRecord>>,
}

impl ApplicationRepository for MemoryRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id, record.clone());
        Ok(record)
    }

    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            guard.insert(record.id, record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn remove(&self, id: ApplicationId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(&id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn list(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

pub(super) fn submission(first_name: &str, last_name: &str) -> ApplicationSubmission {
    ApplicationSubmission {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!(
            "{}.{}@example.com",
            first_name.to_ascii_lowercase(),
            last_name.to_ascii_lowercase()
        ),
        phone: None,
        position_id: Some(3),
        business_unit_id: Some(1),
        note: None,
    }
}

pub(super) fn service_with_hub() -> (
    Arc<RecruitingService<MemoryRepository>>,
    Arc<NotificationHub>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let hub = Arc::new(NotificationHub::new());
    let service = Arc::new(RecruitingService::new(repository, hub.clone()));
    (service, hub)
}
