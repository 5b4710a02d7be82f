use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::queue::{reorder_and_estimate, QueueEntry, QueuePriority, QueueStatus};
use shared_models::scheduling::{Appointment, AppointmentStatus, Doctor, WeeklyAvailability};

use crate::error::StoreError;

#[derive(Default)]
struct QueueBoard {
    entries: HashMap<Uuid, QueueEntry>,
    next_seq: u64,
}

/// The single scheduling authority. Doctors, appointments and the
/// walk-in queue live in independent id-keyed collections related by
/// id lookup, each behind its own lock.
///
/// The write guards are the serialization boundary: a booking's
/// overlap check and insert happen under one appointments guard, and
/// every queue mutation recomputes ordering and wait estimates before
/// its guard drops, so estimates are never derived from a stale order.
pub struct ClinicStore {
    pub config: AppConfig,
    doctors: RwLock<HashMap<Uuid, Doctor>>,
    appointments: RwLock<HashMap<Uuid, Appointment>>,
    queue: RwLock<QueueBoard>,
}

impl ClinicStore {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            doctors: RwLock::new(HashMap::new()),
            appointments: RwLock::new(HashMap::new()),
            queue: RwLock::new(QueueBoard::default()),
        }
    }

    // ==========================================================================
    // DOCTORS
    // ==========================================================================

    pub async fn insert_doctor(&self, doctor: Doctor) -> Doctor {
        let mut doctors = self.doctors.write().await;
        doctors.insert(doctor.id, doctor.clone());
        debug!("Doctor {} registered", doctor.id);
        doctor
    }

    pub async fn get_doctor(&self, doctor_id: Uuid) -> Option<Doctor> {
        let doctors = self.doctors.read().await;
        doctors.get(&doctor_id).cloned()
    }

    pub async fn set_doctor_availability(
        &self,
        doctor_id: Uuid,
        availability: WeeklyAvailability,
    ) -> Result<Doctor, StoreError> {
        let mut doctors = self.doctors.write().await;
        let doctor = doctors
            .get_mut(&doctor_id)
            .ok_or(StoreError::DoctorNotFound(doctor_id))?;

        doctor.availability = availability;
        doctor.updated_at = Utc::now();
        Ok(doctor.clone())
    }

    // ==========================================================================
    // APPOINTMENTS
    // ==========================================================================

    /// All non-cancelled appointments for one doctor on one date, in
    /// chronological order.
    pub async fn appointments_for_doctor_on(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
    ) -> Vec<Appointment> {
        let appointments = self.appointments.read().await;
        let mut result: Vec<Appointment> = appointments
            .values()
            .filter(|a| a.doctor_id == doctor_id && a.date == date && a.blocks_slot())
            .cloned()
            .collect();
        result.sort_by_key(|a| a.start_time);
        result
    }

    pub async fn get_appointment(&self, appointment_id: Uuid) -> Option<Appointment> {
        let appointments = self.appointments.read().await;
        appointments.get(&appointment_id).cloned()
    }

    /// Atomic accept-or-conflict: the overlap re-check and the insert
    /// run under one write guard, so of two racing requests for the
    /// same slot exactly one succeeds and the loser observes the
    /// winner's row.
    pub async fn try_insert_appointment(
        &self,
        appointment: Appointment,
    ) -> Result<Appointment, StoreError> {
        let mut appointments = self.appointments.write().await;

        let taken = appointments.values().any(|existing| {
            existing.doctor_id == appointment.doctor_id
                && existing.date == appointment.date
                && existing.blocks_slot()
                && existing.overlaps(appointment.start_time, appointment.end_time)
        });

        if taken {
            return Err(StoreError::SlotTaken {
                date: appointment.date,
                start_time: appointment.start_time,
                end_time: appointment.end_time,
            });
        }

        appointments.insert(appointment.id, appointment.clone());
        debug!(
            "Appointment {} booked for doctor {} on {} {}-{}",
            appointment.id,
            appointment.doctor_id,
            appointment.date,
            appointment.start_time,
            appointment.end_time
        );
        Ok(appointment)
    }

    /// Status moves are legality-checked against the transition table
    /// under the same guard as the write; an illegal move is rejected,
    /// never silently ignored.
    pub async fn update_appointment_status(
        &self,
        appointment_id: Uuid,
        target: AppointmentStatus,
    ) -> Result<Appointment, StoreError> {
        let mut appointments = self.appointments.write().await;
        let appointment = appointments
            .get_mut(&appointment_id)
            .ok_or(StoreError::AppointmentNotFound(appointment_id))?;

        if !appointment.status.can_transition_to(&target) {
            return Err(StoreError::IllegalTransition {
                kind: "appointment",
                from: appointment.status.to_string(),
                to: target.to_string(),
                legal: join_statuses(appointment.status.legal_transitions()),
            });
        }

        let from = appointment.status;
        appointment.status = target;
        appointment.updated_at = Utc::now();
        debug!("Appointment {} moved {} -> {}", appointment_id, from, target);
        Ok(appointment.clone())
    }

    // ==========================================================================
    // WALK-IN QUEUE
    // ==========================================================================

    pub async fn admit_queue_entry(
        &self,
        patient_name: String,
        patient_contact: Option<String>,
        priority: QueuePriority,
        assigned_doctor_id: Option<Uuid>,
    ) -> QueueEntry {
        let mut board = self.queue.write().await;
        let now = Utc::now();

        let entry = QueueEntry {
            id: Uuid::new_v4(),
            patient_name,
            patient_contact,
            priority,
            arrival_time: now,
            admission_seq: board.next_seq,
            status: QueueStatus::Waiting,
            estimated_wait_minutes: 0,
            assigned_doctor_id,
            updated_at: now,
        };
        board.next_seq += 1;

        let entry_id = entry.id;
        board.entries.insert(entry_id, entry);
        self.reorder_locked(&mut board);

        debug!("Queue entry {} admitted with priority {}", entry_id, priority);
        board.entries[&entry_id].clone()
    }

    pub async fn get_queue_entry(&self, entry_id: Uuid) -> Option<QueueEntry> {
        let board = self.queue.read().await;
        board.entries.get(&entry_id).cloned()
    }

    /// Active entries in canonical order: priority rank descending,
    /// then arrival time, then admission sequence.
    pub async fn active_queue(&self) -> Vec<QueueEntry> {
        let board = self.queue.read().await;
        let mut active: Vec<QueueEntry> = board
            .entries
            .values()
            .filter(|e| e.status.is_active())
            .cloned()
            .collect();
        active.sort_by_key(|e| e.ordering_key());
        active
    }

    pub async fn update_queue_status(
        &self,
        entry_id: Uuid,
        target: QueueStatus,
    ) -> Result<QueueEntry, StoreError> {
        let mut board = self.queue.write().await;
        let entry = board
            .entries
            .get_mut(&entry_id)
            .ok_or(StoreError::QueueEntryNotFound(entry_id))?;

        if !entry.status.can_transition_to(&target) {
            return Err(StoreError::IllegalTransition {
                kind: "queue entry",
                from: entry.status.to_string(),
                to: target.to_string(),
                legal: join_queue_statuses(entry.status.legal_transitions()),
            });
        }

        let from = entry.status;
        entry.status = target;
        entry.updated_at = Utc::now();
        self.reorder_locked(&mut board);

        debug!("Queue entry {} moved {} -> {}", entry_id, from, target);
        Ok(board.entries[&entry_id].clone())
    }

    /// Removal is a transition to cancelled, not a delete; the row is
    /// retained for history and drops out of the active order.
    pub async fn cancel_queue_entry(&self, entry_id: Uuid) -> Result<QueueEntry, StoreError> {
        self.update_queue_status(entry_id, QueueStatus::Cancelled).await
    }

    fn reorder_locked(&self, board: &mut QueueBoard) {
        let mut active: Vec<&mut QueueEntry> = board
            .entries
            .values_mut()
            .filter(|e| e.status.is_active())
            .collect();
        reorder_and_estimate(&mut active, self.config.average_service_minutes);
    }
}

fn join_statuses(statuses: &[AppointmentStatus]) -> String {
    statuses
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_queue_statuses(statuses: &[QueueStatus]) -> String {
    statuses
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
