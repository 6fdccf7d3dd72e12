mod common;

use pretty_assertions::assert_eq;
use salonbook_api::services::{
    booking::{appointment_end, first_available},
    ownership::check_owner,
};
use salonbook_core::errors::BookingError;
use salonbook_db::repositories::ownership::Owned;
use uuid::Uuid;

use common::{at, service};

#[test]
fn test_owned_record_passes() {
    let establishment = Uuid::new_v4();
    assert!(check_owner(Owned::Employee, Uuid::new_v4(), Some(establishment), establishment).is_ok());
}

#[test]
fn test_missing_record_is_not_found() {
    let id = Uuid::new_v4();
    let result = check_owner(Owned::Service, id, None, Uuid::new_v4());

    match result {
        Err(BookingError::NotFound(message)) => {
            assert_eq!(message, format!("Service with ID {} not found", id))
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_foreign_record_is_forbidden() {
    let result = check_owner(
        Owned::Customer,
        Uuid::new_v4(),
        Some(Uuid::new_v4()),
        Uuid::new_v4(),
    );
    assert!(matches!(result, Err(BookingError::Authorization(_))));
}

#[test]
fn test_appointment_end_follows_service_duration() {
    let haircut = service(Uuid::new_v4(), 45);
    let end = appointment_end(at("2030-01-07T09:00:00Z"), &haircut).unwrap();
    assert_eq!(end, at("2030-01-07T09:45:00Z"));
}

#[test]
fn test_appointment_end_rejects_zero_duration() {
    let broken = service(Uuid::new_v4(), 0);
    assert!(matches!(
        appointment_end(at("2030-01-07T09:00:00Z"), &broken),
        Err(BookingError::Validation(_))
    ));
}

#[tokio::test]
async fn test_booking_moves_on_when_first_employee_was_taken() {
    let taken = Uuid::new_v4();
    let free = Uuid::new_v4();
    let mut tried = Vec::new();

    let booked = first_available(&[taken, free], |employee_id| {
        tried.push(employee_id);
        async move {
            if employee_id == taken {
                Err(BookingError::Conflict("Employee is busy".to_string()))
            } else {
                Ok(employee_id)
            }
        }
    })
    .await
    .unwrap();

    assert_eq!(booked, free);
    assert_eq!(tried, vec![taken, free]);
}

#[tokio::test]
async fn test_booking_conflicts_when_every_employee_is_taken() {
    let employees = [Uuid::new_v4(), Uuid::new_v4()];

    let result: Result<Uuid, _> = first_available(&employees, |_| async {
        Err(BookingError::Conflict("Employee is busy".to_string()))
    })
    .await;

    assert!(matches!(result, Err(BookingError::Conflict(_))));
}

#[tokio::test]
async fn test_booking_without_candidates_conflicts() {
    let result: Result<Uuid, _> = first_available(&[], |id| async move { Ok(id) }).await;
    assert!(matches!(result, Err(BookingError::Conflict(_))));
}

#[tokio::test]
async fn test_booking_stops_at_non_conflict_errors() {
    let employees = [Uuid::new_v4(), Uuid::new_v4()];
    let mut tried = Vec::new();

    let result: Result<Uuid, _> = first_available(&employees, |employee_id| {
        tried.push(employee_id);
        async { Err(BookingError::validation("Service has no duration")) }
    })
    .await;

    assert!(matches!(result, Err(BookingError::Validation(_))));
    assert_eq!(tried, vec![employees[0]]);
}
