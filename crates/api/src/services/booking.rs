//! # Booking
//!
//! Every write that places an appointment on an employee's calendar runs in
//! one transaction that first locks the employee row and then checks for
//! overlapping appointments. Two concurrent requests for the same employee
//! therefore serialize, and the second one sees the first one's appointment.

use chrono::{DateTime, Duration, Utc};
use salonbook_core::{
    errors::{BookingError, BookingResult},
    models::{
        appointment::{
            Appointment, AppointmentStatus, CreateAppointmentRequest, PublicBookingRequest,
            UpdateAppointmentRequest,
        },
        availability::{AvailableSlot, AvailableSlotsResponse},
    },
};
use salonbook_db::{
    DbPool,
    models::{DbAppointment, DbService},
    repositories::{
        appointment::{self, NewAppointment},
        catalog, customer, employee, loyalty,
        ownership::Owned,
        package,
    },
};
use sqlx::PgConnection;
use uuid::Uuid;

use crate::services::ownership::ensure_owned;

/// End of an appointment starting at `start` for `service`.
pub fn appointment_end(start: DateTime<Utc>, service: &DbService) -> BookingResult<DateTime<Utc>> {
    if service.duration_minutes <= 0 {
        return Err(BookingError::validation(format!(
            "Service {} has no duration",
            service.id
        )));
    }
    Ok(start + Duration::minutes(i64::from(service.duration_minutes)))
}

/// Locks the employee and rejects `[start, end)` if it overlaps another
/// appointment. Must run inside a transaction.
async fn reserve(
    conn: &mut PgConnection,
    employee_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude: Option<Uuid>,
) -> BookingResult<()> {
    if !employee::lock_employee(conn, employee_id).await? {
        return Err(BookingError::not_found("Employee", employee_id));
    }

    if appointment::has_overlap(conn, employee_id, start, end, exclude).await? {
        tracing::info!(
            "Rejected booking for employee {} at {}: time already taken",
            employee_id,
            start
        );
        return Err(BookingError::Conflict(format!(
            "Employee {} already has an appointment between {} and {}",
            employee_id, start, end
        )));
    }

    Ok(())
}

pub async fn create_appointment(
    pool: &DbPool,
    establishment_id: Uuid,
    request: &CreateAppointmentRequest,
) -> BookingResult<Appointment> {
    ensure_owned(pool, establishment_id, Owned::Employee, request.employee_id).await?;
    ensure_owned(pool, establishment_id, Owned::Service, request.service_id).await?;
    ensure_owned(pool, establishment_id, Owned::Customer, request.customer_id).await?;

    let service = catalog::get_service(pool, establishment_id, request.service_id)
        .await?
        .ok_or_else(|| BookingError::not_found("Service", request.service_id))?;

    if let Some(customer_package_id) = request.customer_package_id {
        ensure_owned(
            pool,
            establishment_id,
            Owned::CustomerPackage,
            customer_package_id,
        )
        .await?;
        let purchase = package::get_customer_package(pool, customer_package_id)
            .await?
            .ok_or_else(|| BookingError::not_found("Customer package", customer_package_id))?;
        if purchase.customer_id != request.customer_id {
            return Err(BookingError::validation(
                "Package belongs to a different customer",
            ));
        }
        if purchase.remaining_sessions <= 0 {
            return Err(BookingError::Conflict(format!(
                "Customer package {} has no sessions left",
                customer_package_id
            )));
        }
    }

    let end_time = appointment_end(request.start_time, &service)?;

    let mut tx = pool.begin().await.map_err(eyre::Report::from)?;
    reserve(
        &mut *tx,
        request.employee_id,
        request.start_time,
        end_time,
        None,
    )
    .await?;

    let row = appointment::insert_appointment(
        &mut *tx,
        &NewAppointment {
            establishment_id,
            employee_id: request.employee_id,
            service_id: service.id,
            customer_id: request.customer_id,
            customer_package_id: request.customer_package_id,
            start_time: request.start_time,
            end_time,
            notes: request.notes.as_deref(),
        },
    )
    .await?;
    tx.commit().await.map_err(eyre::Report::from)?;

    tracing::info!(
        "Booked appointment {} for employee {} at {}",
        row.id,
        row.employee_id,
        row.start_time
    );

    Ok(Appointment::try_from(row)?)
}

/// Moves a scheduled appointment to another time and/or employee, keeping
/// its length.
pub async fn reschedule_appointment(
    pool: &DbPool,
    establishment_id: Uuid,
    id: Uuid,
    request: &UpdateAppointmentRequest,
) -> BookingResult<Appointment> {
    if let Some(employee_id) = request.employee_id {
        ensure_owned(pool, establishment_id, Owned::Employee, employee_id).await?;
    }

    let mut tx = pool.begin().await.map_err(eyre::Report::from)?;
    let current = appointment::get_appointment_for_update(&mut *tx, establishment_id, id)
        .await?
        .ok_or_else(|| BookingError::not_found("Appointment", id))?;

    let status = current.parsed_status()?;
    if status != AppointmentStatus::Scheduled {
        return Err(BookingError::validation(format!(
            "Only scheduled appointments can be changed, this one is {}",
            status
        )));
    }

    let employee_id = request.employee_id.unwrap_or(current.employee_id);
    let start_time = request.start_time.unwrap_or(current.start_time);
    let end_time = start_time + (current.end_time - current.start_time);

    reserve(&mut *tx, employee_id, start_time, end_time, Some(id)).await?;

    let row = appointment::reschedule_appointment(
        &mut *tx,
        id,
        employee_id,
        start_time,
        end_time,
        request.notes.as_deref(),
    )
    .await?;
    tx.commit().await.map_err(eyre::Report::from)?;

    Ok(Appointment::try_from(row)?)
}

/// Applies a status change. Completing an appointment credits loyalty
/// points and uses up one package session when a package was attached.
pub async fn change_status(
    pool: &DbPool,
    establishment_id: Uuid,
    id: Uuid,
    next: AppointmentStatus,
) -> BookingResult<Appointment> {
    let mut tx = pool.begin().await.map_err(eyre::Report::from)?;
    let current = appointment::get_appointment_for_update(&mut *tx, establishment_id, id)
        .await?
        .ok_or_else(|| BookingError::not_found("Appointment", id))?;

    current.parsed_status()?.ensure_transition(next)?;

    let row = appointment::set_status(&mut *tx, id, next).await?;

    if next == AppointmentStatus::Completed {
        let credited = loyalty::accrue_points(&mut *tx, establishment_id, row.customer_id).await?;
        tracing::debug!(
            "Credited {} loyalty programs for customer {}",
            credited,
            row.customer_id
        );

        if let Some(customer_package_id) = row.customer_package_id {
            if package::consume_session(&mut *tx, customer_package_id)
                .await?
                .is_none()
            {
                return Err(BookingError::Conflict(format!(
                    "Customer package {} has no sessions left",
                    customer_package_id
                )));
            }
        }
    }

    tx.commit().await.map_err(eyre::Report::from)?;
    tracing::info!("Appointment {} is now {}", id, next);

    Ok(Appointment::try_from(row)?)
}

/// Runs `attempt` for each candidate in order and returns the first success.
///
/// A conflict moves on to the next candidate; any other error ends the search.
pub async fn first_available<T, F, Fut>(candidates: &[Uuid], mut attempt: F) -> BookingResult<T>
where
    F: FnMut(Uuid) -> Fut,
    Fut: Future<Output = BookingResult<T>>,
{
    let mut last_conflict = None;
    for &candidate in candidates {
        match attempt(candidate).await {
            Err(BookingError::Conflict(message)) => {
                tracing::debug!("Candidate {} is taken: {}", candidate, message);
                last_conflict = Some(message);
            }
            other => return other,
        }
    }

    Err(BookingError::Conflict(last_conflict.unwrap_or_else(|| {
        "No employee is available at this time".to_string()
    })))
}

/// Places a public booking. `availability` is the slot list computed for the
/// requested day; the requested start must be one of its slots. Without a
/// requested employee, every employee listed for the slot is tried in turn.
pub async fn book_public(
    pool: &DbPool,
    establishment_id: Uuid,
    availability: &AvailableSlotsResponse,
    request: &PublicBookingRequest,
) -> BookingResult<Appointment> {
    let slot = availability
        .find_slot(request.start_time, request.employee_id)
        .ok_or_else(|| {
            BookingError::Conflict(format!(
                "The time {} is not available for booking",
                request.start_time
            ))
        })?;

    let candidates = match request.employee_id {
        Some(id) => vec![id],
        None => slot.employee_ids.clone(),
    };

    let row = first_available(&candidates, |employee_id| {
        place_public_booking(
            pool,
            establishment_id,
            availability.service_id,
            employee_id,
            slot,
            request,
        )
    })
    .await?;

    tracing::info!(
        "Public booking {} for customer {} with employee {} at {}",
        row.id,
        row.customer_id,
        row.employee_id,
        row.start_time
    );

    Ok(Appointment::try_from(row)?)
}

/// One booking attempt with a single employee, in its own transaction.
async fn place_public_booking(
    pool: &DbPool,
    establishment_id: Uuid,
    service_id: Uuid,
    employee_id: Uuid,
    slot: &AvailableSlot,
    request: &PublicBookingRequest,
) -> BookingResult<DbAppointment> {
    let mut tx = pool.begin().await.map_err(eyre::Report::from)?;
    reserve(&mut *tx, employee_id, slot.start, slot.end, None).await?;

    let customer = customer::find_or_create_by_phone(
        &mut *tx,
        establishment_id,
        request.customer_name.trim(),
        request.customer_phone.trim(),
        request.customer_email.as_deref(),
    )
    .await?;

    let row = appointment::insert_appointment(
        &mut *tx,
        &NewAppointment {
            establishment_id,
            employee_id,
            service_id,
            customer_id: customer.id,
            customer_package_id: None,
            start_time: slot.start,
            end_time: slot.end,
            notes: request.notes.as_deref(),
        },
    )
    .await?;
    tx.commit().await.map_err(eyre::Report::from)?;

    Ok(row)
}
