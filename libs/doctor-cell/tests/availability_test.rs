use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use doctor_cell::services::availability::{compute_slots, AvailabilityService};
use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_models::scheduling::{
    Appointment, AppointmentStatus, AppointmentType, DayWindow, Doctor, WeeklyAvailability,
};
use shared_store::ClinicStore;

fn time(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

// 2024-01-01 is a Monday.
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn tuesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
}

fn monday_window(start: NaiveTime, end: NaiveTime) -> WeeklyAvailability {
    let mut availability = WeeklyAvailability::default();
    availability.days[1] = DayWindow::open(start, end);
    availability
}

fn test_store() -> Arc<ClinicStore> {
    Arc::new(ClinicStore::new(AppConfig::default()))
}

async fn seed_doctor(store: &Arc<ClinicStore>, availability: WeeklyAvailability) -> Uuid {
    let now = Utc::now();
    let doctor = store
        .insert_doctor(Doctor {
            id: Uuid::new_v4(),
            full_name: "Dr. Amaya Osei".to_string(),
            specialty: "General Practice".to_string(),
            is_active: true,
            availability,
            created_at: now,
            updated_at: now,
        })
        .await;
    doctor.id
}

fn appointment(doctor_id: Uuid, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Appointment {
    let now = Utc::now();
    Appointment {
        id: Uuid::new_v4(),
        doctor_id,
        patient_name: "Test Patient".to_string(),
        patient_contact: None,
        date,
        start_time: start,
        end_time: end,
        status: AppointmentStatus::Scheduled,
        appointment_type: AppointmentType::Consultation,
        is_urgent: false,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn one_hour_window_partitions_into_two_half_hour_slots() {
    let store = test_store();
    let doctor_id = seed_doctor(&store, monday_window(time(9, 0), time(10, 0))).await;

    let slots = AvailabilityService::new(store)
        .available_slots(doctor_id, monday())
        .await
        .expect("slots should resolve");

    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].start_time, time(9, 0));
    assert_eq!(slots[0].end_time, time(9, 30));
    assert_eq!(slots[1].start_time, time(9, 30));
    assert_eq!(slots[1].end_time, time(10, 0));
}

#[tokio::test]
async fn unavailable_weekday_yields_no_slots() {
    let store = test_store();
    let doctor_id = seed_doctor(&store, monday_window(time(9, 0), time(10, 0))).await;

    let slots = AvailabilityService::new(store)
        .available_slots(doctor_id, tuesday())
        .await
        .expect("slots should resolve");

    assert!(slots.is_empty(), "closed weekday must produce no slots");
}

#[tokio::test]
async fn trailing_partial_slot_is_dropped() {
    let store = test_store();
    // 75-minute window: two full slots fit, the trailing 15 minutes do not.
    let doctor_id = seed_doctor(&store, monday_window(time(9, 0), time(10, 15))).await;

    let slots = AvailabilityService::new(store)
        .available_slots(doctor_id, monday())
        .await
        .expect("slots should resolve");

    assert_eq!(slots.len(), 2);
    assert_eq!(slots.last().unwrap().end_time, time(10, 0));
}

#[tokio::test]
async fn booked_interval_is_filtered_out() {
    let store = test_store();
    let doctor_id = seed_doctor(&store, monday_window(time(9, 0), time(10, 0))).await;
    store
        .try_insert_appointment(appointment(doctor_id, monday(), time(9, 0), time(9, 30)))
        .await
        .expect("seed booking should insert");

    let slots = AvailabilityService::new(store)
        .available_slots(doctor_id, monday())
        .await
        .expect("slots should resolve");

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].start_time, time(9, 30));
}

#[tokio::test]
async fn repeated_calls_with_no_intervening_booking_are_identical() {
    let store = test_store();
    let doctor_id = seed_doctor(&store, monday_window(time(8, 0), time(12, 0))).await;
    let service = AvailabilityService::new(store);

    let first = service.available_slots(doctor_id, monday()).await.unwrap();
    let second = service.available_slots(doctor_id, monday()).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn slots_are_uniform_non_overlapping_and_inside_the_window() {
    let store = test_store();
    let doctor_id = seed_doctor(&store, monday_window(time(8, 0), time(12, 0))).await;
    store
        .try_insert_appointment(appointment(doctor_id, monday(), time(9, 0), time(9, 30)))
        .await
        .unwrap();
    store
        .try_insert_appointment(appointment(doctor_id, monday(), time(10, 30), time(11, 0)))
        .await
        .unwrap();

    let existing = store.appointments_for_doctor_on(doctor_id, monday()).await;
    let slots = AvailabilityService::new(store)
        .available_slots(doctor_id, monday())
        .await
        .unwrap();

    assert_eq!(slots.len(), 6);
    for slot in &slots {
        let minutes = (slot.end_time - slot.start_time).num_minutes();
        assert_eq!(minutes, 30, "every slot has the configured duration");
        assert!(slot.start_time >= time(8, 0) && slot.end_time <= time(12, 0));
        for booked in &existing {
            assert!(
                !booked.overlaps(slot.start_time, slot.end_time),
                "open slot must not overlap a booked appointment"
            );
        }
    }
    for pair in slots.windows(2) {
        assert!(pair[0].end_time <= pair[1].start_time, "chronological, non-overlapping");
    }
}

#[tokio::test]
async fn unknown_doctor_is_not_found() {
    let store = test_store();

    let result = AvailabilityService::new(store)
        .available_slots(Uuid::new_v4(), monday())
        .await;

    assert_matches!(result, Err(AppError::NotFound(_)));
}

#[tokio::test]
async fn inactive_doctor_is_not_found() {
    let store = test_store();
    let now = Utc::now();
    let doctor = store
        .insert_doctor(Doctor {
            id: Uuid::new_v4(),
            full_name: "Dr. Retired".to_string(),
            specialty: "General Practice".to_string(),
            is_active: false,
            availability: monday_window(time(9, 0), time(10, 0)),
            created_at: now,
            updated_at: now,
        })
        .await;

    let result = AvailabilityService::new(store)
        .available_slots(doctor.id, monday())
        .await;

    assert_matches!(result, Err(AppError::NotFound(_)));
}

#[test]
fn compute_slots_ignores_times_on_a_closed_window() {
    // Closed day with nonsense times on record; they must be ignored.
    let window = DayWindow {
        start_time: time(23, 0),
        end_time: time(1, 0),
        is_available: false,
    };

    let slots = compute_slots(&window, monday(), 30, &[]);
    assert!(slots.is_empty());
}

#[test]
fn compute_slots_with_zero_appointments_fills_the_window() {
    let window = DayWindow::open(time(13, 0), time(15, 0));

    let slots = compute_slots(&window, monday(), 30, &[]);

    assert_eq!(slots.len(), 4);
    assert_eq!(slots[0].start_time, time(13, 0));
    assert_eq!(slots[3].end_time, time(15, 0));
}
