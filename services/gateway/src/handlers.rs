use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use devledger_consensus::ConsensusSnapshot;
use devledger_core::error::RegistryError;
use devledger_registry::{Device, DeviceSnapshot};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::error;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ReputationRequest {
    pub delta: f64,
}

type ApiError = (StatusCode, Json<Value>);

/// Map the registry taxonomy onto transport status codes.
fn error_response(err: RegistryError) -> ApiError {
    let status = match &err {
        RegistryError::Validation(_) => StatusCode::BAD_REQUEST,
        RegistryError::NotFound { .. } => StatusCode::NOT_FOUND,
        RegistryError::Conflict { .. } | RegistryError::ConcurrentUpdate { .. } => {
            StatusCode::CONFLICT
        }
        RegistryError::Timeout { .. } => StatusCode::SERVICE_UNAVAILABLE,
        RegistryError::Io(_) | RegistryError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!(error = %err, "Registry operation failed");
    }

    (status, Json(json!({ "error": err.to_string() })))
}

fn task_failure() -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal task failure" })),
    )
}

pub async fn register_device(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Device>), ApiError> {
    let device = tokio::task::spawn_blocking(move || state.registry.register(&request.name))
        .await
        .map_err(|_| task_failure())?
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(device)))
}

pub async fn get_device(
    State(state): State<Arc<AppState>>,
    Path(device_id): Path<String>,
) -> Result<Json<Device>, ApiError> {
    let device = tokio::task::spawn_blocking(move || state.registry.get(&device_id))
        .await
        .map_err(|_| task_failure())?
        .map_err(error_response)?;

    Ok(Json(device))
}

pub async fn update_reputation(
    State(state): State<Arc<AppState>>,
    Path(device_id): Path<String>,
    Json(request): Json<ReputationRequest>,
) -> Result<Json<Device>, ApiError> {
    let device = tokio::task::spawn_blocking(move || {
        state.registry.update_reputation(&device_id, request.delta)
    })
    .await
    .map_err(|_| task_failure())?
    .map_err(error_response)?;

    Ok(Json(device))
}

pub async fn retire_device(
    State(state): State<Arc<AppState>>,
    Path(device_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    tokio::task::spawn_blocking(move || state.registry.retire(&device_id))
        .await
        .map_err(|_| task_failure())?
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn device_history(
    State(state): State<Arc<AppState>>,
    Path(device_id): Path<String>,
) -> Result<Json<Vec<DeviceSnapshot>>, ApiError> {
    let history = tokio::task::spawn_blocking(move || state.registry.history(&device_id))
        .await
        .map_err(|_| task_failure())?
        .map_err(error_response)?;

    Ok(Json(history))
}

pub async fn consensus_status(State(state): State<Arc<AppState>>) -> Json<ConsensusSnapshot> {
    Json(state.monitor.status())
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let ledger_health = serde_json::to_value(state.ledger.health()).unwrap_or(Value::Null);
    Json(json!({
        "status": "healthy",
        "service": "devledger-gateway",
        "ledger": ledger_health,
    }))
}
