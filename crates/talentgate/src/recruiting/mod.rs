//! Application intake and review surface.
//!
//! Deliberately thin: an in-process repository abstraction plus a service
//! that applies status transitions and pushes the matching domain event
//! through the notification hub. Persistence, file storage, and outbound
//! email live elsewhere.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus, ApplicationSubmission, DecisionRequest,
    StatusCounts,
};
pub use repository::{ApplicationRepository, RepositoryError};
pub use router::application_router;
pub use service::{
    RecruitingService, ServiceError, APPLICATION_CREATED, APPLICATION_DELETED, APPLICATION_UPDATED,
};
