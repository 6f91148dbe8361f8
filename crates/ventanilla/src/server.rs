//! HTTP transport for the intake service.
//!
//! Thin glue between the JSON API and [`IntakeService`]: five resource
//! routes under `/api`, request bodies deserialized as flat string maps,
//! and every failure folded into `{"error": ...}` with a 404 for missing
//! update targets and a 500 for anything else. There is no authentication,
//! no pagination, and no rate limiting.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::error::{Error, Result};
use crate::record::{Record, RecordKind};
use crate::service::IntakeService;

/// Request bodies: the caller's field or patch mapping.
type Fields = BTreeMap<String, String>;

/// JSON error payload, `{"error": "..."}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// A service error on its way out as an HTTP response.
#[derive(Debug)]
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            error!("request failed: {}", self.0);
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// Build the API router over an intake service.
#[must_use]
pub fn router(service: Arc<IntakeService>) -> Router {
    let api = Router::new()
        .route("/reclamos", get(list_claims).post(create_claim))
        .route("/reclamos/{id}", put(update_claim))
        .route("/solicitudes", get(list_requests).post(create_request))
        .route("/solicitudes/{id}", put(update_request))
        .route("/registros", get(list_merged))
        .with_state(service);

    Router::new().nest("/api", api)
}

/// Bind the given address and serve the API until the task is stopped.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(service: Arc<IntakeService>, addr: &str) -> Result<()> {
    let listener = TcpListener::bind(addr).await.map_err(Error::Io)?;
    info!("Intake API listening on http://{addr}/api");

    axum::serve(listener, router(service))
        .await
        .map_err(Error::Io)?;
    Ok(())
}

async fn list_claims(
    State(service): State<Arc<IntakeService>>,
) -> std::result::Result<Json<Vec<Record>>, ApiError> {
    Ok(Json(service.list(RecordKind::Reclamo)?))
}

async fn create_claim(
    State(service): State<Arc<IntakeService>>,
    Json(fields): Json<Fields>,
) -> std::result::Result<(StatusCode, Json<Record>), ApiError> {
    let record = service.create(RecordKind::Reclamo, fields)?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_claim(
    State(service): State<Arc<IntakeService>>,
    Path(id): Path<i64>,
    Json(patch): Json<Fields>,
) -> std::result::Result<Json<Record>, ApiError> {
    Ok(Json(service.update(RecordKind::Reclamo, id, patch)?))
}

async fn list_requests(
    State(service): State<Arc<IntakeService>>,
) -> std::result::Result<Json<Vec<Record>>, ApiError> {
    Ok(Json(service.list(RecordKind::Solicitud)?))
}

async fn create_request(
    State(service): State<Arc<IntakeService>>,
    Json(fields): Json<Fields>,
) -> std::result::Result<(StatusCode, Json<Record>), ApiError> {
    let record = service.create(RecordKind::Solicitud, fields)?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_request(
    State(service): State<Arc<IntakeService>>,
    Path(id): Path<i64>,
    Json(patch): Json<Fields>,
) -> std::result::Result<Json<Record>, ApiError> {
    Ok(Json(service.update(RecordKind::Solicitud, id, patch)?))
}

async fn list_merged(
    State(service): State<Arc<IntakeService>>,
) -> std::result::Result<Json<Vec<Record>>, ApiError> {
    Ok(Json(service.list_merged()?))
}
