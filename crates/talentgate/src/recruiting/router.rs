use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde_json::json;

use super::domain::{ApplicationId, ApplicationSubmission, DecisionRequest};
use super::repository::{ApplicationRepository, RepositoryError};
use super::service::{RecruitingService, ServiceError};

/// Router builder exposing the application intake and review endpoints.
pub fn application_router<R>(service: Arc<RecruitingService<R>>) -> Router
where
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/applications",
            post(submit_handler::<R>).get(list_handler::<R>),
        )
        .route("/api/v1/applications/counts", get(counts_handler::<R>))
        .route(
            "/api/v1/applications/:application_id",
            get(get_handler::<R>).delete(delete_handler::<R>),
        )
        .route(
            "/api/v1/applications/:application_id/decision",
            put(decide_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<RecruitingService<R>>>,
    axum::Json(submission): axum::Json<ApplicationSubmission>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.submit(submission).await {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<RecruitingService<R>>>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.list() {
        Ok(records) => {
            let total = records.len();
            let payload = json!({ "items": records, "total": total });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn counts_handler<R>(
    State(service): State<Arc<RecruitingService<R>>>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.counts() {
        Ok(counts) => (StatusCode::OK, axum::Json(counts)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<RecruitingService<R>>>,
    Path(application_id): Path<i64>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.get(ApplicationId(application_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn decide_handler<R>(
    State(service): State<Arc<RecruitingService<R>>>,
    Path(application_id): Path<i64>,
    axum::Json(decision): axum::Json<DecisionRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.decide(ApplicationId(application_id), decision).await {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<RecruitingService<R>>>,
    Path(application_id): Path<i64>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.remove(ApplicationId(application_id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ServiceError) -> Response {
    let status = match &error {
        ServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ServiceError::UnknownStatus(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
