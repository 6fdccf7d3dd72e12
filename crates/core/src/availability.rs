//! # Availability
//!
//! Turns a day's opening hours into bookable windows for a service:
//!
//! 1. Candidate windows start at opening time and advance by the slot
//!    interval; each lasts the service duration and must end by closing time.
//! 2. Windows overlapping a break, or starting before `not_before`, are dropped.
//! 3. For each remaining window, an employee is free when none of their busy
//!    ranges (appointments, unavailability) overlap it.
//! 4. Windows with at least one free employee are bookable.
//!
//! All times here are local wall-clock times of the establishment.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};

/// Half-open range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn on_date(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Option<Self> {
        Self::new(date.and_time(start), date.and_time(end))
    }

    /// Touching ranges do not overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, other: &TimeRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// One day of opening hours prepared for a specific date.
#[derive(Debug, Clone)]
pub struct DayWindow {
    pub date: NaiveDate,
    pub opening: NaiveTime,
    pub closing: NaiveTime,
    pub breaks: Vec<(NaiveTime, NaiveTime)>,
}

#[derive(Debug, Clone)]
pub struct SlotRequest {
    pub day: DayWindow,
    pub duration_minutes: u32,
    pub step_minutes: u32,
    /// Earliest allowed start, usually "now" in the establishment's timezone.
    pub not_before: Option<NaiveDateTime>,
}

/// Everything that keeps one employee busy on the requested day.
#[derive(Debug, Clone, Default)]
pub struct EmployeeCalendar {
    pub employee_id: Uuid,
    pub busy: Vec<TimeRange>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookableSlot {
    pub window: TimeRange,
    pub employee_ids: Vec<Uuid>,
}

pub fn is_free(busy: &[TimeRange], window: &TimeRange) -> bool {
    !busy.iter().any(|range| range.overlaps(window))
}

/// Lists the windows a service of the requested duration could occupy,
/// before any employee is considered.
pub fn candidate_windows(request: &SlotRequest) -> BookingResult<Vec<TimeRange>> {
    if request.duration_minutes == 0 {
        return Err(BookingError::validation("Service duration must be positive"));
    }
    if request.step_minutes == 0 {
        return Err(BookingError::validation("Slot interval must be positive"));
    }

    let day = &request.day;
    let Some(opening_hours) = TimeRange::on_date(day.date, day.opening, day.closing) else {
        return Err(BookingError::validation(
            "Opening time must be before closing time",
        ));
    };
    let breaks: Vec<TimeRange> = day
        .breaks
        .iter()
        .filter_map(|(start, end)| TimeRange::on_date(day.date, *start, *end))
        .collect();

    let duration = Duration::minutes(i64::from(request.duration_minutes));
    let step = Duration::minutes(i64::from(request.step_minutes));

    let mut windows = Vec::new();
    let mut start = opening_hours.start;
    while start + duration <= opening_hours.end {
        let window = TimeRange {
            start,
            end: start + duration,
        };
        let too_early = request.not_before.is_some_and(|limit| start < limit);
        if !too_early && is_free(&breaks, &window) {
            windows.push(window);
        }
        start += step;
    }

    Ok(windows)
}

/// Intersects candidate windows with employee calendars.
///
/// Employee ids in each slot keep the order of `employees`.
pub fn bookable_slots(
    request: &SlotRequest,
    employees: &[EmployeeCalendar],
) -> BookingResult<Vec<BookableSlot>> {
    let windows = candidate_windows(request)?;

    let slots = windows
        .into_iter()
        .filter_map(|window| {
            let employee_ids: Vec<Uuid> = employees
                .iter()
                .filter(|calendar| is_free(&calendar.busy, &window))
                .map(|calendar| calendar.employee_id)
                .collect();
            (!employee_ids.is_empty()).then_some(BookableSlot {
                window,
                employee_ids,
            })
        })
        .collect();

    Ok(slots)
}
