use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use shared_models::error::AppError;
use shared_models::queue::{QueueEntry, QueueStatus};
use shared_store::ClinicStore;

use crate::models::AdmitPatientRequest;

/// Walk-in queue front: admission, status moves and removal, each of
/// which ends with the store reordering active entries and refreshing
/// every wait estimate inside the same write guard. There is no
/// background timer; estimates change only at queue-affecting events.
pub struct QueueService {
    store: Arc<ClinicStore>,
}

impl QueueService {
    pub fn new(store: Arc<ClinicStore>) -> Self {
        Self { store }
    }

    pub async fn admit(&self, request: AdmitPatientRequest) -> Result<QueueEntry, AppError> {
        if request.patient_name.trim().is_empty() {
            return Err(AppError::Validation(
                "patient_name must not be empty".to_string(),
            ));
        }

        let entry = self
            .store
            .admit_queue_entry(
                request.patient_name,
                request.patient_contact,
                request.priority,
                request.assigned_doctor_id,
            )
            .await;

        info!(
            "Patient admitted to queue as {} ({}), estimated wait {} min",
            entry.id, entry.priority, entry.estimated_wait_minutes
        );
        Ok(entry)
    }

    pub async fn get(&self, entry_id: Uuid) -> Result<QueueEntry, AppError> {
        self.store
            .get_queue_entry(entry_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Queue entry {} not found", entry_id)))
    }

    /// Active entries in priority order with current estimates.
    pub async fn board(&self) -> Vec<QueueEntry> {
        self.store.active_queue().await
    }

    pub async fn update_status(
        &self,
        entry_id: Uuid,
        target: QueueStatus,
    ) -> Result<QueueEntry, AppError> {
        let updated = self.store.update_queue_status(entry_id, target).await?;
        info!("Queue entry {} is now {}", updated.id, updated.status);
        Ok(updated)
    }

    /// Staff removal: a transition to cancelled that drops the entry
    /// from the active order and triggers a reorder.
    pub async fn remove(&self, entry_id: Uuid) -> Result<QueueEntry, AppError> {
        let cancelled = self.store.cancel_queue_entry(entry_id).await?;
        info!("Queue entry {} removed from queue", cancelled.id);
        Ok(cancelled)
    }
}
