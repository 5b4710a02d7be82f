use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::scheduling::{AppointmentStatus, AppointmentType};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub patient_name: String,
    pub patient_contact: Option<String>,
    #[serde(default)]
    pub appointment_type: AppointmentType,
    #[serde(default)]
    pub is_urgent: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAppointmentStatusRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, Deserialize)]
pub struct DoctorScheduleParams {
    pub date: NaiveDate,
}
