use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_models::queue::QueueEntry;
use shared_store::ClinicStore;

use crate::models::{AdmitPatientRequest, UpdateQueueStatusRequest};
use crate::services::queue::QueueService;

#[axum::debug_handler]
pub async fn admit_patient(
    State(store): State<Arc<ClinicStore>>,
    Json(request): Json<AdmitPatientRequest>,
) -> Result<(StatusCode, Json<QueueEntry>), AppError> {
    let service = QueueService::new(store);
    let entry = service.admit(request).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[axum::debug_handler]
pub async fn get_queue(
    State(store): State<Arc<ClinicStore>>,
) -> Result<Json<Vec<QueueEntry>>, AppError> {
    let service = QueueService::new(store);
    Ok(Json(service.board().await))
}

#[axum::debug_handler]
pub async fn get_queue_entry(
    State(store): State<Arc<ClinicStore>>,
    Path(entry_id): Path<Uuid>,
) -> Result<Json<QueueEntry>, AppError> {
    let service = QueueService::new(store);
    let entry = service.get(entry_id).await?;
    Ok(Json(entry))
}

#[axum::debug_handler]
pub async fn update_queue_status(
    State(store): State<Arc<ClinicStore>>,
    Path(entry_id): Path<Uuid>,
    Json(request): Json<UpdateQueueStatusRequest>,
) -> Result<Json<QueueEntry>, AppError> {
    let service = QueueService::new(store);
    let entry = service.update_status(entry_id, request.status).await?;
    Ok(Json(entry))
}

#[axum::debug_handler]
pub async fn remove_queue_entry(
    State(store): State<Arc<ClinicStore>>,
    Path(entry_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let service = QueueService::new(store);
    service.remove(entry_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
