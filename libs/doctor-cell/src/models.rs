use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shared_models::scheduling::WeeklyAvailability;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterDoctorRequest {
    pub full_name: String,
    pub specialty: String,
    pub availability: Option<WeeklyAvailability>,
}

#[derive(Debug, Deserialize)]
pub struct SlotQueryParams {
    pub date: NaiveDate,
}
