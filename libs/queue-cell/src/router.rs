use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use shared_store::ClinicStore;

use crate::handlers;

pub fn queue_routes(state: Arc<ClinicStore>) -> Router {
    Router::new()
        .route("/", post(handlers::admit_patient).get(handlers::get_queue))
        .route(
            "/{entry_id}",
            get(handlers::get_queue_entry).delete(handlers::remove_queue_entry),
        )
        .route("/{entry_id}/status", patch(handlers::update_queue_status))
        .with_state(state)
}
