use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use shared_store::ClinicStore;

use crate::handlers;

pub fn doctor_routes(state: Arc<ClinicStore>) -> Router {
    Router::new()
        .route("/", post(handlers::register_doctor))
        .route("/{doctor_id}", get(handlers::get_doctor))
        .route("/{doctor_id}/availability", put(handlers::update_availability))
        .route("/{doctor_id}/slots", get(handlers::get_available_slots))
        .with_state(state)
}
