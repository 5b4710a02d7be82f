use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::router::appointment_routes;
use doctor_cell::router::doctor_routes;
use queue_cell::router::queue_routes;
use shared_store::ClinicStore;

pub fn create_router(state: Arc<ClinicStore>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic front-desk API is running!" }))
        .nest("/doctors", doctor_routes(state.clone()))
        .nest("/appointments", appointment_routes(state.clone()))
        .nest("/queue", queue_routes(state))
}
