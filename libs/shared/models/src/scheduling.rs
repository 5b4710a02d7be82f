use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==============================================================================
// DOCTOR & AVAILABILITY MODELS
// ==============================================================================

/// One weekday's opening window. When `is_available` is false the times
/// carry no meaning and must be ignored by every reader.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DayWindow {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
}

impl DayWindow {
    pub fn open(start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            start_time,
            end_time,
            is_available: true,
        }
    }

    pub fn closed() -> Self {
        Self {
            start_time: NaiveTime::MIN,
            end_time: NaiveTime::MIN,
            is_available: false,
        }
    }
}

impl Default for DayWindow {
    fn default() -> Self {
        Self::closed()
    }
}

/// Recurring weekly open hours as seven independent day records,
/// indexed 0 = Sunday through 6 = Saturday.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WeeklyAvailability {
    pub days: [DayWindow; 7],
}

impl WeeklyAvailability {
    pub fn window_for(&self, weekday: Weekday) -> &DayWindow {
        &self.days[weekday.num_days_from_sunday() as usize]
    }

    /// Invariant owned by doctor-profile edits: an open day needs
    /// `start_time < end_time`; closed days are never inspected.
    pub fn validate(&self) -> Result<(), String> {
        for (idx, day) in self.days.iter().enumerate() {
            if day.is_available && day.start_time >= day.end_time {
                return Err(format!(
                    "day {}: start time must be before end time",
                    idx
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub full_name: String,
    pub specialty: String,
    pub is_active: bool,
    pub availability: WeeklyAvailability,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==============================================================================
// TIME SLOTS
// ==============================================================================

/// A bookable candidate interval. Never persisted on its own; only
/// appointments carry concrete slots.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSlot {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Half-open interval overlap: `[a_start, a_end)` intersects
/// `[b_start, b_end)` iff `a_start < b_end && b_start < a_end`.
pub fn intervals_overlap(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

// ==============================================================================
// APPOINTMENTS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub patient_name: String,
    pub patient_contact: Option<String>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: AppointmentStatus,
    pub appointment_type: AppointmentType,
    pub is_urgent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// Cancelled appointments keep their row for audit but release
    /// the interval they occupied.
    pub fn blocks_slot(&self) -> bool {
        self.status != AppointmentStatus::Cancelled
    }

    pub fn overlaps(&self, start_time: NaiveTime, end_time: NaiveTime) -> bool {
        intervals_overlap(self.start_time, self.end_time, start_time, end_time)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Completed | AppointmentStatus::Cancelled)
    }

    /// Central transition table. Forward one step at a time, with
    /// cancellation reachable from any non-terminal state.
    pub fn can_transition_to(&self, target: &AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        match (self, target) {
            (Scheduled, Confirmed) => true,
            (Confirmed, InProgress) => true,
            (InProgress, Completed) => true,
            (Scheduled, Cancelled) | (Confirmed, Cancelled) | (InProgress, Cancelled) => true,
            _ => false,
        }
    }

    pub fn legal_transitions(&self) -> &'static [AppointmentStatus] {
        use AppointmentStatus::*;
        match self {
            Scheduled => &[Confirmed, Cancelled],
            Confirmed => &[InProgress, Cancelled],
            InProgress => &[Completed, Cancelled],
            Completed | Cancelled => &[],
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::InProgress => write!(f, "in_progress"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentType {
    Consultation,
    FollowUp,
    CheckUp,
    Procedure,
}

impl Default for AppointmentType {
    fn default() -> Self {
        AppointmentType::Consultation
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentType::Consultation => write!(f, "consultation"),
            AppointmentType::FollowUp => write!(f, "follow_up"),
            AppointmentType::CheckUp => write!(f, "check_up"),
            AppointmentType::Procedure => write!(f, "procedure"),
        }
    }
}
