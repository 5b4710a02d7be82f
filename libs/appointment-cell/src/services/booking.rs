use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use doctor_cell::services::availability::AvailabilityService;
use shared_models::error::AppError;
use shared_models::scheduling::{Appointment, AppointmentStatus, TimeSlot};
use shared_store::ClinicStore;

use crate::models::BookAppointmentRequest;

pub struct BookingService {
    store: Arc<ClinicStore>,
}

impl BookingService {
    pub fn new(store: Arc<ClinicStore>) -> Self {
        Self { store }
    }

    /// Accept a booking iff the requested interval exactly matches a
    /// slot the finder currently reports open, then insert it
    /// atomically. A request racing for the same slot loses at the
    /// store with a conflict; nothing is silently overwritten.
    pub async fn book(&self, request: BookAppointmentRequest) -> Result<Appointment, AppError> {
        if request.end_time <= request.start_time {
            return Err(AppError::Validation(
                "end_time must be after start_time".to_string(),
            ));
        }
        if request.patient_name.trim().is_empty() {
            return Err(AppError::Validation(
                "patient_name must not be empty".to_string(),
            ));
        }

        debug!(
            "Booking request for doctor {} on {} {}-{}",
            request.doctor_id, request.date, request.start_time, request.end_time
        );

        let finder = AvailabilityService::new(self.store.clone());
        let open_slots = finder
            .available_slots(request.doctor_id, request.date)
            .await?;

        let requested = TimeSlot {
            date: request.date,
            start_time: request.start_time,
            end_time: request.end_time,
        };

        if !open_slots.contains(&requested) {
            return Err(AppError::Conflict(format!(
                "slot {} {}-{} is not open for doctor {}",
                request.date, request.start_time, request.end_time, request.doctor_id
            )));
        }

        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            doctor_id: request.doctor_id,
            patient_name: request.patient_name,
            patient_contact: request.patient_contact,
            date: request.date,
            start_time: request.start_time,
            end_time: request.end_time,
            status: AppointmentStatus::Scheduled,
            appointment_type: request.appointment_type,
            is_urgent: request.is_urgent,
            created_at: now,
            updated_at: now,
        };

        // The slot-set check above can go stale under concurrency; the
        // store re-checks overlap under its write guard and is the
        // accept/reject authority.
        let stored = self.store.try_insert_appointment(appointment).await?;

        info!(
            "Appointment {} scheduled for doctor {} on {} {}",
            stored.id, stored.doctor_id, stored.date, stored.start_time
        );
        Ok(stored)
    }

    pub async fn get(&self, appointment_id: Uuid) -> Result<Appointment, AppError> {
        self.store
            .get_appointment(appointment_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Appointment {} not found", appointment_id)))
    }

    /// A doctor's non-cancelled appointments for one date, in
    /// chronological order.
    pub async fn doctor_schedule(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, AppError> {
        self.store
            .get_doctor(doctor_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Doctor {} not found", doctor_id)))?;

        Ok(self.store.appointments_for_doctor_on(doctor_id, date).await)
    }
}
