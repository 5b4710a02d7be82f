use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use shared_models::error::AppError;
use shared_models::scheduling::{Appointment, AppointmentStatus};
use shared_store::ClinicStore;

pub struct LifecycleService {
    store: Arc<ClinicStore>,
}

impl LifecycleService {
    pub fn new(store: Arc<ClinicStore>) -> Self {
        Self { store }
    }

    /// Route every status move through the central transition table;
    /// an illegal move surfaces the currently legal targets.
    pub async fn update_status(
        &self,
        appointment_id: Uuid,
        target: AppointmentStatus,
    ) -> Result<Appointment, AppError> {
        let updated = self
            .store
            .update_appointment_status(appointment_id, target)
            .await?;

        info!("Appointment {} is now {}", updated.id, updated.status);
        Ok(updated)
    }

    /// Cancellation is a terminal transition kept for audit, not a
    /// delete; the slot it held becomes bookable again.
    pub async fn cancel(&self, appointment_id: Uuid) -> Result<Appointment, AppError> {
        self.update_status(appointment_id, AppointmentStatus::Cancelled)
            .await
    }
}
