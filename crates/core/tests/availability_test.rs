use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use pretty_assertions::assert_eq;
use rstest::rstest;
use salonbook_core::{
    availability::{
        DayWindow, EmployeeCalendar, SlotRequest, TimeRange, bookable_slots, candidate_windows,
    },
    errors::BookingError,
};
use uuid::Uuid;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn at(h: u32, m: u32) -> NaiveDateTime {
    date().and_time(t(h, m))
}

fn range(from: (u32, u32), to: (u32, u32)) -> TimeRange {
    TimeRange::new(at(from.0, from.1), at(to.0, to.1)).unwrap()
}

fn request(duration_minutes: u32) -> SlotRequest {
    SlotRequest {
        day: DayWindow {
            date: date(),
            opening: t(9, 0),
            closing: t(12, 0),
            breaks: vec![(t(10, 0), t(10, 30))],
        },
        duration_minutes,
        step_minutes: 30,
        not_before: None,
    }
}

fn starts(windows: &[TimeRange]) -> Vec<String> {
    windows
        .iter()
        .map(|w| w.start.format("%H:%M").to_string())
        .collect()
}

#[rstest]
#[case(range((9, 0), (10, 0)), range((9, 30), (10, 30)), true)]
#[case(range((9, 0), (10, 0)), range((10, 0), (11, 0)), false)]
#[case(range((9, 0), (12, 0)), range((10, 0), (10, 15)), true)]
#[case(range((9, 0), (9, 30)), range((11, 0), (11, 30)), false)]
fn test_overlap_is_half_open_and_symmetric(
    #[case] a: TimeRange,
    #[case] b: TimeRange,
    #[case] expected: bool,
) {
    assert_eq!(a.overlaps(&b), expected);
    assert_eq!(b.overlaps(&a), expected);
}

#[test]
fn test_empty_range_is_rejected() {
    assert!(TimeRange::new(at(9, 0), at(9, 0)).is_none());
    assert!(TimeRange::new(at(10, 0), at(9, 0)).is_none());
}

#[test]
fn test_candidates_skip_break_and_fit_before_closing() {
    let windows = candidate_windows(&request(30)).unwrap();
    assert_eq!(starts(&windows), vec!["09:00", "09:30", "10:30", "11:00", "11:30"]);

    // A one-hour service starting at 09:30 would run into the break.
    let windows = candidate_windows(&request(60)).unwrap();
    assert_eq!(starts(&windows), vec!["09:00", "10:30", "11:00"]);
}

#[test]
fn test_not_before_drops_past_starts() {
    let mut req = request(30);
    req.not_before = Some(at(10, 45));
    let windows = candidate_windows(&req).unwrap();
    assert_eq!(starts(&windows), vec!["11:00", "11:30"]);
}

#[test]
fn test_zero_duration_is_invalid() {
    let err = candidate_windows(&request(0)).unwrap_err();
    assert!(matches!(err, BookingError::Validation(_)));
}

#[test]
fn test_bookable_slots_subtract_each_employee_calendar() {
    let ana = Uuid::new_v4();
    let bruno = Uuid::new_v4();
    let calendars = vec![
        EmployeeCalendar {
            employee_id: ana,
            // appointment 09:00-09:45 and an unavailability 11:00-12:00
            busy: vec![range((9, 0), (9, 45)), range((11, 0), (12, 0))],
        },
        EmployeeCalendar {
            employee_id: bruno,
            busy: vec![range((10, 30), (11, 30))],
        },
    ];

    let slots = bookable_slots(&request(30), &calendars).unwrap();
    let summary: Vec<(String, Vec<Uuid>)> = slots
        .iter()
        .map(|s| (s.window.start.format("%H:%M").to_string(), s.employee_ids.clone()))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("09:00".to_string(), vec![bruno]),
            ("09:30".to_string(), vec![bruno]),
            ("10:30".to_string(), vec![ana]),
            ("11:30".to_string(), vec![bruno]),
        ]
    );
}

#[test]
fn test_no_employees_means_no_slots() {
    let slots = bookable_slots(&request(30), &[]).unwrap();
    assert!(slots.is_empty());
}
