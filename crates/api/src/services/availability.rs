//! # Available Slots
//!
//! Assembles the inputs of [`salonbook_core::availability::bookable_slots`]
//! from an [`AvailabilitySource`] and converts the result back to UTC.
//!
//! Appointments are fetched for a UTC window padded around the local day so
//! that any timezone offset is covered; exact filtering happens locally.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use salonbook_core::{
    availability::{DayWindow, EmployeeCalendar, SlotRequest, TimeRange, bookable_slots},
    errors::{BookingError, BookingResult},
    models::{
        availability::{AvailableSlot, AvailableSlotsQuery, AvailableSlotsResponse},
        unavailability::applies_on,
    },
    time::{format_hhmm, local_to_utc, parse_timezone, utc_to_local, weekday_index},
};
use salonbook_db::{
    models::{DbAppointment, DbEmployee, DbUnavailability},
    source::AvailabilitySource,
};
use uuid::Uuid;

/// Largest UTC offset in either direction, in hours.
const MAX_OFFSET_HOURS: i64 = 14;

pub async fn find_available_slots<S>(
    source: &S,
    establishment_id: Uuid,
    query: &AvailableSlotsQuery,
    step_minutes: u32,
    now: DateTime<Utc>,
) -> BookingResult<AvailableSlotsResponse>
where
    S: AvailabilitySource + ?Sized,
{
    let establishment = source
        .establishment(establishment_id)
        .await?
        .ok_or_else(|| BookingError::not_found("Establishment", establishment_id))?;
    let tz = parse_timezone(&establishment.timezone)?;

    let service = source
        .service(establishment_id, query.service_id)
        .await?
        .ok_or_else(|| BookingError::not_found("Service", query.service_id))?;
    if !service.active {
        return Err(BookingError::validation(format!(
            "Service {} is not available for booking",
            service.id
        )));
    }

    let mut response = AvailableSlotsResponse {
        date: query.date,
        service_id: service.id,
        duration_minutes: service.duration_minutes,
        available_slots: Vec::new(),
    };

    let Some(hours) = source
        .opening_hours(establishment_id, weekday_index(query.date))
        .await?
    else {
        tracing::debug!(
            "Establishment {} is closed on {}",
            establishment_id,
            query.date
        );
        return Ok(response);
    };
    let breaks = source.breaks(hours.id).await?;

    let employees = source.employees(establishment_id, query.employee_id).await?;
    if let Some(employee_id) = query.employee_id {
        if employees.is_empty() {
            return Err(BookingError::not_found("Employee", employee_id));
        }
    }
    let employee_ids: Vec<Uuid> = employees.iter().map(|e| e.id).collect();

    let midnight = Utc.from_utc_datetime(&query.date.and_time(NaiveTime::MIN));
    let from = midnight - Duration::hours(MAX_OFFSET_HOURS);
    let to = midnight + Duration::hours(24 + MAX_OFFSET_HOURS);
    let appointments = source.appointments(&employee_ids, from, to).await?;
    let unavailabilities = source.unavailabilities(&employee_ids).await?;

    let calendars = build_calendars(
        tz,
        query.date,
        &employees,
        &appointments,
        &unavailabilities,
    );

    let request = SlotRequest {
        day: DayWindow {
            date: query.date,
            opening: hours.opening_time,
            closing: hours.closing_time,
            breaks: breaks.iter().map(|b| (b.start_time, b.end_time)).collect(),
        },
        duration_minutes: u32::try_from(service.duration_minutes)
            .map_err(|_| BookingError::validation("Service duration must be positive"))?,
        step_minutes,
        not_before: Some(utc_to_local(tz, now)),
    };

    response.available_slots = bookable_slots(&request, &calendars)?
        .into_iter()
        .filter_map(|slot| {
            Some(AvailableSlot {
                time: format_hhmm(slot.window.start.time()),
                start: local_to_utc(tz, slot.window.start)?,
                end: local_to_utc(tz, slot.window.end)?,
                employee_ids: slot.employee_ids,
            })
        })
        .collect();

    tracing::debug!(
        "Computed {} available slots for service {} on {}",
        response.available_slots.len(),
        service.id,
        query.date
    );

    Ok(response)
}

/// Collects each employee's busy ranges for `date`, in local time.
pub fn build_calendars(
    tz: Tz,
    date: NaiveDate,
    employees: &[DbEmployee],
    appointments: &[DbAppointment],
    unavailabilities: &[DbUnavailability],
) -> Vec<EmployeeCalendar> {
    employees
        .iter()
        .map(|employee| {
            let booked = appointments
                .iter()
                .filter(|a| a.employee_id == employee.id)
                .filter(|a| {
                    a.parsed_status()
                        .map(|status| status.blocks_time())
                        .unwrap_or(true)
                })
                .filter_map(|a| {
                    TimeRange::new(utc_to_local(tz, a.start_time), utc_to_local(tz, a.end_time))
                });

            let blocked = unavailabilities
                .iter()
                .filter(|u| u.employee_id == employee.id)
                .filter(|u| applies_on(u.day_of_week, u.date, date))
                .filter_map(|u| TimeRange::on_date(date, u.start_time, u.end_time));

            EmployeeCalendar {
                employee_id: employee.id,
                busy: booked.chain(blocked).collect(),
            }
        })
        .collect()
}
