use chrono::NaiveTime;
use pretty_assertions::assert_eq;
use rstest::rstest;
use salonbook_core::{
    errors::BookingError,
    models::store_hours::{BreakInterval, OpeningHours},
    slots::{SlotTemplate, generate_slots, generate_slots_from_strings, weekly_template},
};
use uuid::Uuid;

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn slot(time: &str, available: bool) -> SlotTemplate {
    SlotTemplate {
        time: time.to_string(),
        available,
    }
}

#[test]
fn test_morning_with_half_hour_break() {
    let slots =
        generate_slots_from_strings("09:00", "12:00", Some("10:00"), Some("10:30"), 30).unwrap();

    assert_eq!(
        slots,
        vec![
            slot("09:00", true),
            slot("09:30", true),
            slot("10:00", false),
            slot("10:30", true),
            slot("11:00", true),
            slot("11:30", true),
        ]
    );
}

#[rstest]
#[case("09:00", "12:00", 30, 6)]
#[case("09:00", "12:00", 45, 4)]
#[case("08:15", "08:20", 30, 1)]
#[case("00:00", "23:59", 60, 24)]
#[case("10:00", "18:00", 7, 69)]
#[case("09:00", "12:00", 180, 1)]
#[case("09:00", "12:00", u32::MAX, 1)]
fn test_slot_count_is_ceiling_of_span(
    #[case] open: &str,
    #[case] close: &str,
    #[case] interval: u32,
    #[case] expected: usize,
) {
    let slots = generate_slots_from_strings(open, close, None, None, interval).unwrap();
    assert_eq!(slots.len(), expected);
    assert!(slots.windows(2).all(|pair| pair[0].time < pair[1].time));
    assert!(slots.iter().all(|s| s.available));
}

#[rstest]
#[case(Some(t(10, 0)), None)]
#[case(None, Some(t(10, 30)))]
fn test_partial_break_marks_nothing(
    #[case] break_start: Option<NaiveTime>,
    #[case] break_end: Option<NaiveTime>,
) {
    let slots = generate_slots(t(9, 0), t(12, 0), break_start, break_end, 30).unwrap();
    assert!(slots.iter().all(|s| s.available));
}

#[test]
fn test_break_covers_every_start_inside_it() {
    let slots = generate_slots(t(8, 0), t(18, 0), Some(t(12, 0)), Some(t(13, 30)), 30).unwrap();
    let unavailable: Vec<&str> = slots
        .iter()
        .filter(|s| !s.available)
        .map(|s| s.time.as_str())
        .collect();

    assert_eq!(unavailable, vec!["12:00", "12:30", "13:00"]);
}

#[test]
fn test_break_end_is_exclusive() {
    let slots = generate_slots(t(9, 0), t(11, 0), Some(t(9, 30)), Some(t(10, 0)), 30).unwrap();
    assert_eq!(slots[1], slot("09:30", false));
    assert_eq!(slots[2], slot("10:00", true));
}

#[test]
fn test_break_only_covers_slots_lying_inside_it() {
    let slots = generate_slots(t(10, 0), t(11, 0), Some(t(10, 15)), Some(t(10, 45)), 30).unwrap();
    assert_eq!(slots, vec![slot("10:00", true), slot("10:30", true)]);
}

#[test]
fn test_last_slot_ends_at_closing_time() {
    let slots = generate_slots(t(10, 0), t(10, 45), Some(t(10, 30)), Some(t(10, 45)), 30).unwrap();
    assert_eq!(slots, vec![slot("10:00", true), slot("10:30", false)]);
}

#[rstest]
#[case("12:00", "09:00", 30)]
#[case("09:00", "09:00", 30)]
#[case("09:00", "12:00", 0)]
#[case("9am", "12:00", 30)]
fn test_invalid_input_is_rejected(#[case] open: &str, #[case] close: &str, #[case] interval: u32) {
    let err = generate_slots_from_strings(open, close, None, None, interval).unwrap_err();
    assert!(matches!(err, BookingError::Validation(_)));
}

#[test]
fn test_weekly_template_orders_days_and_applies_all_breaks() {
    let monday_id = Uuid::new_v4();
    let establishment_id = Uuid::new_v4();
    let hours = vec![
        OpeningHours {
            id: monday_id,
            establishment_id,
            day_of_week: 1,
            opening_time: t(9, 0),
            closing_time: t(11, 0),
            breaks: vec![
                BreakInterval {
                    id: Uuid::new_v4(),
                    opening_hour_id: monday_id,
                    start_time: t(9, 0),
                    end_time: t(9, 30),
                },
                BreakInterval {
                    id: Uuid::new_v4(),
                    opening_hour_id: monday_id,
                    start_time: t(10, 30),
                    end_time: t(11, 0),
                },
            ],
        },
        OpeningHours {
            id: Uuid::new_v4(),
            establishment_id,
            day_of_week: 0,
            opening_time: t(10, 0),
            closing_time: t(11, 0),
            breaks: Vec::new(),
        },
    ];

    let week = weekly_template(&hours, 30);

    assert_eq!(week.len(), 2);
    assert_eq!(week[0].day_of_week, 0);
    assert_eq!(week[0].slots, vec![slot("10:00", true), slot("10:30", true)]);
    assert_eq!(
        week[1].slots,
        vec![
            slot("09:00", false),
            slot("09:30", true),
            slot("10:00", true),
            slot("10:30", false),
        ]
    );
}
