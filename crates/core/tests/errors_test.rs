use std::error::Error;
use salonbook_core::errors::{BookingError, BookingResult};

#[test]
fn test_booking_error_display() {
    let not_found = BookingError::NotFound("Employee not found".to_string());
    let validation = BookingError::Validation("Invalid input".to_string());
    let authentication = BookingError::Authentication("Missing establishment".to_string());
    let authorization = BookingError::Authorization("Not authorized".to_string());
    let conflict = BookingError::Conflict("Slot taken".to_string());
    let database = BookingError::Database(eyre::eyre!("Database connection failed"));
    let internal = BookingError::Internal(Box::new(std::io::Error::other("Internal error")));

    assert_eq!(
        not_found.to_string(),
        "Resource not found: Employee not found"
    );
    assert_eq!(validation.to_string(), "Validation error: Invalid input");
    assert_eq!(
        authentication.to_string(),
        "Authentication error: Missing establishment"
    );
    assert_eq!(
        authorization.to_string(),
        "Authorization error: Not authorized"
    );
    assert_eq!(conflict.to_string(), "Conflict: Slot taken");
    assert!(database.to_string().contains("Database error:"));
    assert!(internal.to_string().contains("Internal server error:"));
}

#[test]
fn test_not_found_helper_names_the_record() {
    let err = BookingError::not_found("Service", "abc");
    assert_eq!(err.to_string(), "Resource not found: Service with ID abc not found");
}

#[test]
fn test_internal_keeps_source() {
    let io_error = std::io::Error::other("IO error");
    let booking_error = BookingError::Internal(Box::new(io_error));

    assert!(booking_error.source().is_some());
    assert!(booking_error.to_string().contains("IO error"));
}

#[test]
fn test_eyre_report_converts() {
    fn fails() -> BookingResult<()> {
        Err(eyre::eyre!("pool timed out"))?
    }

    let err = fails().unwrap_err();
    assert!(matches!(err, BookingError::Database(_)));
    assert!(err.to_string().contains("pool timed out"));
}
