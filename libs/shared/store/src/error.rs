use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;
use uuid::Uuid;

use shared_models::error::AppError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("doctor {0} not found")]
    DoctorNotFound(Uuid),

    #[error("appointment {0} not found")]
    AppointmentNotFound(Uuid),

    #[error("queue entry {0} not found")]
    QueueEntryNotFound(Uuid),

    #[error("slot {date} {start_time}-{end_time} conflicts with an existing appointment")]
    SlotTaken {
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    },

    #[error("cannot move {kind} from {from} to {to}; legal transitions: [{legal}]")]
    IllegalTransition {
        kind: &'static str,
        from: String,
        to: String,
        legal: String,
    },
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DoctorNotFound(_)
            | StoreError::AppointmentNotFound(_)
            | StoreError::QueueEntryNotFound(_) => AppError::NotFound(err.to_string()),
            StoreError::SlotTaken { .. } => AppError::Conflict(err.to_string()),
            StoreError::IllegalTransition { .. } => AppError::IllegalTransition(err.to_string()),
        }
    }
}
