pub mod appointment;
pub mod availability;
pub mod category;
pub mod customer;
pub mod employee;
pub mod establishment;
pub mod loyalty;
pub mod metrics;
pub mod package;
pub mod service;
pub mod store_hours;
pub mod unavailability;

use crate::errors::{BookingError, BookingResult};

pub(crate) fn require_non_empty(field: &str, value: &str) -> BookingResult<()> {
    if value.trim().is_empty() {
        return Err(BookingError::validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

pub(crate) fn require_positive(field: &str, value: i32) -> BookingResult<()> {
    if value <= 0 {
        return Err(BookingError::validation(format!(
            "{} must be greater than zero",
            field
        )));
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &str, value: i64) -> BookingResult<()> {
    if value < 0 {
        return Err(BookingError::validation(format!("{} must not be negative", field)));
    }
    Ok(())
}
