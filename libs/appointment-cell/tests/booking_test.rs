use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use appointment_cell::models::BookAppointmentRequest;
use appointment_cell::services::booking::BookingService;
use appointment_cell::services::lifecycle::LifecycleService;
use doctor_cell::services::availability::AvailabilityService;
use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_models::scheduling::{
    AppointmentStatus, AppointmentType, DayWindow, Doctor, WeeklyAvailability,
};
use shared_store::ClinicStore;

fn time(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

// 2024-01-01 is a Monday.
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn test_store() -> Arc<ClinicStore> {
    Arc::new(ClinicStore::new(AppConfig::default()))
}

async fn seed_doctor(store: &Arc<ClinicStore>) -> Uuid {
    let mut availability = WeeklyAvailability::default();
    availability.days[1] = DayWindow::open(time(9, 0), time(12, 0));

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

fn booking_request(doctor_id: Uuid, start: NaiveTime, end: NaiveTime) -> BookAppointmentRequest {
    BookAppointmentRequest {
        doctor_id,
        date: monday(),
        start_time: start,
        end_time: end,
        patient_name: "Test Patient".to_string(),
        patient_contact: Some("patient@example.com".to_string()),
        appointment_type: AppointmentType::Consultation,
        is_urgent: false,
    }
}

#[tokio::test]
async fn booking_an_open_slot_creates_a_scheduled_appointment() {
    let store = test_store();
    let doctor_id = seed_doctor(&store).await;

    let appointment = BookingService::new(store)
        .book(booking_request(doctor_id, time(9, 0), time(9, 30)))
        .await
        .expect("booking an open slot should succeed");

    assert_eq!(appointment.status, AppointmentStatus::Scheduled);
    assert_eq!(appointment.doctor_id, doctor_id);
    assert_eq!(appointment.start_time, time(9, 0));
    assert_eq!(appointment.end_time, time(9, 30));
}

#[tokio::test]
async fn booked_slot_disappears_from_the_finder() {
    let store = test_store();
    let doctor_id = seed_doctor(&store).await;

    BookingService::new(store.clone())
        .book(booking_request(doctor_id, time(9, 0), time(9, 30)))
        .await
        .unwrap();

    let slots = AvailabilityService::new(store)
        .available_slots(doctor_id, monday())
        .await
        .unwrap();

    assert!(slots.iter().all(|s| s.start_time != time(9, 0)));
}

#[tokio::test]
async fn double_booking_the_same_slot_is_a_conflict() {
    let store = test_store();
    let doctor_id = seed_doctor(&store).await;
    let service = BookingService::new(store);

    service
        .book(booking_request(doctor_id, time(9, 0), time(9, 30)))
        .await
        .expect("first booking wins");

    let second = service
        .book(booking_request(doctor_id, time(9, 0), time(9, 30)))
        .await;

    assert_matches!(second, Err(AppError::Conflict(_)));
}

#[tokio::test]
async fn concurrent_bookings_for_one_slot_have_exactly_one_winner() {
    let store = test_store();
    let doctor_id = seed_doctor(&store).await;

    let first = {
        let store = store.clone();
        tokio::spawn(async move {
            BookingService::new(store)
                .book(booking_request(doctor_id, time(10, 0), time(10, 30)))
                .await
        })
    };
    let second = {
        let store = store.clone();
        tokio::spawn(async move {
            BookingService::new(store)
                .book(booking_request(doctor_id, time(10, 0), time(10, 30)))
                .await
        })
    };

    let results = [first.await.unwrap(), second.await.unwrap()];
    let winners = results.iter().filter(|r| r.is_ok()).count();

    assert_eq!(winners, 1, "exactly one of two racing bookings may succeed");
    let loser = results.iter().find(|r| r.is_err()).unwrap();
    assert_matches!(loser, Err(AppError::Conflict(_)));

    // The store holds a single appointment for that interval.
    let booked = store.appointments_for_doctor_on(doctor_id, monday()).await;
    assert_eq!(booked.len(), 1);
}

#[tokio::test]
async fn inverted_time_range_is_a_validation_error() {
    let store = test_store();
    let doctor_id = seed_doctor(&store).await;

    let result = BookingService::new(store)
        .book(booking_request(doctor_id, time(9, 30), time(9, 0)))
        .await;

    assert_matches!(result, Err(AppError::Validation(_)));
}

#[tokio::test]
async fn off_grid_start_time_is_a_conflict() {
    let store = test_store();
    let doctor_id = seed_doctor(&store).await;

    // Well-formed range, but not a slot the finder reports.
    let result = BookingService::new(store)
        .book(booking_request(doctor_id, time(9, 10), time(9, 40)))
        .await;

    assert_matches!(result, Err(AppError::Conflict(_)));
}

#[tokio::test]
async fn booking_with_an_unknown_doctor_is_not_found() {
    let store = test_store();

    let result = BookingService::new(store)
        .book(booking_request(Uuid::new_v4(), time(9, 0), time(9, 30)))
        .await;

    assert_matches!(result, Err(AppError::NotFound(_)));
}

#[tokio::test]
async fn cancelled_appointment_releases_its_slot() {
    let store = test_store();
    let doctor_id = seed_doctor(&store).await;
    let booking = BookingService::new(store.clone());

    let appointment = booking
        .book(booking_request(doctor_id, time(9, 0), time(9, 30)))
        .await
        .unwrap();

    LifecycleService::new(store.clone())
        .cancel(appointment.id)
        .await
        .expect("cancelling a scheduled appointment is legal");

    // The cancelled row is retained for audit but no longer blocks.
    let retained = store.get_appointment(appointment.id).await.unwrap();
    assert_eq!(retained.status, AppointmentStatus::Cancelled);

    let rebooked = booking
        .book(booking_request(doctor_id, time(9, 0), time(9, 30)))
        .await
        .expect("freed slot should be bookable again");
    assert_eq!(rebooked.status, AppointmentStatus::Scheduled);
}
