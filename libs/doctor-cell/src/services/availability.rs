use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate};
use tracing::debug;
use uuid::Uuid;

use shared_models::error::AppError;
use shared_models::scheduling::{Appointment, DayWindow, TimeSlot};
use shared_store::ClinicStore;

pub struct AvailabilityService {
    store: Arc<ClinicStore>,
}

impl AvailabilityService {
    pub fn new(store: Arc<ClinicStore>) -> Self {
        Self { store }
    }

    /// Open slots for a doctor on a date: the availability window for
    /// that weekday, partitioned into fixed-duration slots, minus
    /// everything that overlaps an existing non-cancelled appointment.
    ///
    /// Recomputed fresh on every call; no cached state. Past dates are
    /// answered like any other, policy about them belongs to callers.
    pub async fn available_slots(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<TimeSlot>, AppError> {
        let doctor = self
            .store
            .get_doctor(doctor_id)
            .await
            .filter(|d| d.is_active)
            .ok_or_else(|| AppError::NotFound(format!("Doctor {} not found", doctor_id)))?;

        let window = *doctor.availability.window_for(date.weekday());
        if !window.is_available {
            debug!("Doctor {} has no availability on {}", doctor_id, date);
            return Ok(vec![]);
        }

        let existing = self.store.appointments_for_doctor_on(doctor_id, date).await;
        let slots = compute_slots(
            &window,
            date,
            self.store.config.slot_duration_minutes,
            &existing,
        );

        debug!(
            "Found {} open slots for doctor {} on {}",
            slots.len(),
            doctor_id,
            date
        );
        Ok(slots)
    }
}

/// Partition `[window.start_time, window.end_time)` into consecutive
/// `duration_minutes` slots starting at the window start, dropping the
/// trailing partial slot, and discard every candidate whose half-open
/// interval intersects an existing appointment. Chronological output.
pub fn compute_slots(
    window: &DayWindow,
    date: NaiveDate,
    duration_minutes: i64,
    existing: &[Appointment],
) -> Vec<TimeSlot> {
    if !window.is_available {
        return vec![];
    }

    let duration = Duration::minutes(duration_minutes);
    let mut slots = Vec::new();
    let mut cursor = window.start_time;

    loop {
        let (slot_end, wrapped) = cursor.overflowing_add_signed(duration);
        if wrapped != 0 || slot_end > window.end_time {
            break;
        }

        let taken = existing
            .iter()
            .any(|appointment| appointment.overlaps(cursor, slot_end));

        if !taken {
            slots.push(TimeSlot {
                date,
                start_time: cursor,
                end_time: slot_end,
            });
        }

        cursor = slot_end;
    }

    slots
}
