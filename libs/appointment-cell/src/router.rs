use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use shared_store::ClinicStore;

use crate::handlers;

pub fn appointment_routes(state: Arc<ClinicStore>) -> Router {
    Router::new()
        .route("/", post(handlers::book_appointment))
        .route("/{appointment_id}", get(handlers::get_appointment))
        .route("/{appointment_id}/status", patch(handlers::update_appointment_status))
        .route("/doctors/{doctor_id}", get(handlers::get_doctor_appointments))
        .with_state(state)
}
