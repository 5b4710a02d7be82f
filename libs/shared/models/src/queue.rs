use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use uuid::Uuid;

// ==============================================================================
// WALK-IN QUEUE MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueuePriority {
    Normal,
    Urgent,
    Emergency,
}

impl QueuePriority {
    /// Primary ordering key; higher rank goes first.
    pub fn rank(&self) -> u8 {
        match self {
            QueuePriority::Normal => 0,
            QueuePriority::Urgent => 1,
            QueuePriority::Emergency => 2,
        }
    }
}

impl fmt::Display for QueuePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueuePriority::Normal => write!(f, "normal"),
            QueuePriority::Urgent => write!(f, "urgent"),
            QueuePriority::Emergency => write!(f, "emergency"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueueStatus {
    Waiting,
    WithDoctor,
    Completed,
    Cancelled,
}

impl QueueStatus {
    /// Active entries count toward ordering and wait estimation.
    pub fn is_active(&self) -> bool {
        matches!(self, QueueStatus::Waiting | QueueStatus::WithDoctor)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, QueueStatus::Completed | QueueStatus::Cancelled)
    }

    pub fn can_transition_to(&self, target: &QueueStatus) -> bool {
        use QueueStatus::*;
        match (self, target) {
            (Waiting, WithDoctor) => true,
            (WithDoctor, Completed) => true,
            (Waiting, Cancelled) | (WithDoctor, Cancelled) => true,
            _ => false,
        }
    }

    pub fn legal_transitions(&self) -> &'static [QueueStatus] {
        use QueueStatus::*;
        match self {
            Waiting => &[WithDoctor, Cancelled],
            WithDoctor => &[Completed, Cancelled],
            Completed | Cancelled => &[],
        }
    }
}

impl fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueStatus::Waiting => write!(f, "waiting"),
            QueueStatus::WithDoctor => write!(f, "with_doctor"),
            QueueStatus::Completed => write!(f, "completed"),
            QueueStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: Uuid,
    pub patient_name: String,
    pub patient_contact: Option<String>,
    pub priority: QueuePriority,
    /// Set once at admission; the tie-break key, never touched by a
    /// status transition.
    pub arrival_time: DateTime<Utc>,
    /// Monotonic admission ordinal; final tie-break when two arrivals
    /// coincide to the same timestamp.
    pub admission_seq: u64,
    pub status: QueueStatus,
    pub estimated_wait_minutes: i64,
    pub assigned_doctor_id: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl QueueEntry {
    pub fn ordering_key(&self) -> (Reverse<u8>, DateTime<Utc>, u64) {
        (
            Reverse(self.priority.rank()),
            self.arrival_time,
            self.admission_seq,
        )
    }
}

/// Sort active entries into the canonical order and refresh every wait
/// estimate: the k-th entry still `Waiting` (0-indexed) gets
/// `k * average_service_minutes`, an entry already `WithDoctor` gets 0.
pub fn reorder_and_estimate(active: &mut [&mut QueueEntry], average_service_minutes: i64) {
    active.sort_by_key(|e| e.ordering_key());

    let mut waiting_ahead: i64 = 0;
    for entry in active.iter_mut() {
        match entry.status {
            QueueStatus::WithDoctor => entry.estimated_wait_minutes = 0,
            QueueStatus::Waiting => {
                entry.estimated_wait_minutes = waiting_ahead * average_service_minutes;
                waiting_ahead += 1;
            }
            _ => {}
        }
    }
}
