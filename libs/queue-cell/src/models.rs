use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::queue::{QueuePriority, QueueStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmitPatientRequest {
    pub patient_name: String,
    pub patient_contact: Option<String>,
    #[serde(default = "default_priority")]
    pub priority: QueuePriority,
    pub assigned_doctor_id: Option<Uuid>,
}

fn default_priority() -> QueuePriority {
    QueuePriority::Normal
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateQueueStatusRequest {
    pub status: QueueStatus,
}
