use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_models::scheduling::Appointment;
use shared_store::ClinicStore;

use crate::models::{
    BookAppointmentRequest, DoctorScheduleParams, UpdateAppointmentStatusRequest,
};
use crate::services::booking::BookingService;
use crate::services::lifecycle::LifecycleService;

#[axum::debug_handler]
pub async fn book_appointment(
    State(store): State<Arc<ClinicStore>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let service = BookingService::new(store);
    let appointment = service.book(request).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(store): State<Arc<ClinicStore>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    let service = BookingService::new(store);
    let appointment = service.get(appointment_id).await?;
    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(store): State<Arc<ClinicStore>>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<UpdateAppointmentStatusRequest>,
) -> Result<Json<Appointment>, AppError> {
    let service = LifecycleService::new(store);
    let appointment = service.update_status(appointment_id, request.status).await?;
    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn get_doctor_appointments(
    State(store): State<Arc<ClinicStore>>,
    Path(doctor_id): Path<Uuid>,
    Query(params): Query<DoctorScheduleParams>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let service = BookingService::new(store);
    let appointments = service.doctor_schedule(doctor_id, params.date).await?;
    Ok(Json(appointments))
}
