use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_models::scheduling::{Doctor, WeeklyAvailability};
use shared_store::ClinicStore;

use crate::models::{RegisterDoctorRequest, SlotQueryParams};
use crate::services::availability::AvailabilityService;

#[axum::debug_handler]
pub async fn register_doctor(
    State(store): State<Arc<ClinicStore>>,
    Json(request): Json<RegisterDoctorRequest>,
) -> Result<(StatusCode, Json<Doctor>), AppError> {
    if request.full_name.trim().is_empty() {
        return Err(AppError::Validation("full_name must not be empty".to_string()));
    }

    let availability = request.availability.unwrap_or_default();
    availability
        .validate()
        .map_err(AppError::Validation)?;

    let now = Utc::now();
    let doctor = store
        .insert_doctor(Doctor {
            id: Uuid::new_v4(),
            full_name: request.full_name,
            specialty: request.specialty,
            is_active: true,
            availability,
            created_at: now,
            updated_at: now,
        })
        .await;

    Ok((StatusCode::CREATED, Json(doctor)))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(store): State<Arc<ClinicStore>>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Doctor>, AppError> {
    let doctor = store
        .get_doctor(doctor_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Doctor {} not found", doctor_id)))?;

    Ok(Json(doctor))
}

/// Doctor-profile edit that owns the availability invariant; the
/// scheduling core only ever reads the result.
#[axum::debug_handler]
pub async fn update_availability(
    State(store): State<Arc<ClinicStore>>,
    Path(doctor_id): Path<Uuid>,
    Json(availability): Json<WeeklyAvailability>,
) -> Result<Json<Doctor>, AppError> {
    availability
        .validate()
        .map_err(AppError::Validation)?;

    let doctor = store.set_doctor_availability(doctor_id, availability).await?;
    Ok(Json(doctor))
}

#[axum::debug_handler]
pub async fn get_available_slots(
    State(store): State<Arc<ClinicStore>>,
    Path(doctor_id): Path<Uuid>,
    Query(params): Query<SlotQueryParams>,
) -> Result<Json<Value>, AppError> {
    let service = AvailabilityService::new(store);
    let slots = service.available_slots(doctor_id, params.date).await?;

    Ok(Json(json!({
        "doctor_id": doctor_id,
        "date": params.date,
        "slots": slots,
    })))
}
