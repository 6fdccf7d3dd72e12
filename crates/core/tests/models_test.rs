use chrono::{NaiveDate, NaiveTime, Utc};
use fake::{Fake, faker::name::en::Name};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, json, to_value};
use serde_test::{Token, assert_tokens};
use salonbook_core::{
    errors::BookingError,
    models::{
        appointment::{AppointmentStatus, PeriodQuery, PublicBookingRequest},
        establishment::{CreateEstablishmentRequest, OnboardingCheck},
        loyalty::LoyaltyBalance,
        metrics::StatusCounts,
        service::CreateServiceRequest,
        store_hours::{BreakRequest, UpsertOpeningHoursRequest},
        unavailability::{CreateUnavailabilityRequest, applies_on},
    },
};
use uuid::Uuid;

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn test_status_serializes_as_snake_case() {
    assert_tokens(
        &AppointmentStatus::CheckedIn,
        &[Token::UnitVariant {
            name: "AppointmentStatus",
            variant: "checked_in",
        }],
    );
    for status in AppointmentStatus::ALL {
        assert_eq!(status.as_str().parse::<AppointmentStatus>().unwrap(), status);
    }
    assert!("done".parse::<AppointmentStatus>().is_err());
}

#[rstest]
#[case(AppointmentStatus::Scheduled, AppointmentStatus::CheckedIn, true)]
#[case(AppointmentStatus::Scheduled, AppointmentStatus::Completed, true)]
#[case(AppointmentStatus::CheckedIn, AppointmentStatus::Completed, true)]
#[case(AppointmentStatus::CheckedIn, AppointmentStatus::Cancelled, true)]
#[case(AppointmentStatus::Completed, AppointmentStatus::Cancelled, false)]
#[case(AppointmentStatus::Cancelled, AppointmentStatus::Scheduled, false)]
#[case(AppointmentStatus::CheckedIn, AppointmentStatus::CheckedIn, false)]
fn test_status_transitions(
    #[case] from: AppointmentStatus,
    #[case] to: AppointmentStatus,
    #[case] allowed: bool,
) {
    assert_eq!(from.can_transition_to(to), allowed);
    assert_eq!(from.ensure_transition(to).is_ok(), allowed);
}

#[test]
fn test_opening_hours_deserialize_from_hhmm() {
    let request: UpsertOpeningHoursRequest = from_str(
        r#"{"opening_time":"09:00","closing_time":"18:00","breaks":[{"start_time":"12:00","end_time":"13:00"}]}"#,
    )
    .unwrap();

    assert_eq!(request.opening_time, t(9, 0));
    assert_eq!(request.breaks[0].end_time, t(13, 0));
    assert!(request.validate().is_ok());
    assert_eq!(to_value(request.breaks[0]).unwrap(), json!({"start_time": "12:00", "end_time": "13:00"}));
}

#[rstest]
#[case(t(18, 0), t(9, 0), vec![])]
#[case(t(9, 0), t(18, 0), vec![(t(13, 0), t(12, 0))])]
#[case(t(9, 0), t(18, 0), vec![(t(8, 0), t(9, 30))])]
#[case(t(9, 0), t(18, 0), vec![(t(12, 0), t(13, 0)), (t(12, 30), t(14, 0))])]
fn test_invalid_opening_hours(
    #[case] opening_time: NaiveTime,
    #[case] closing_time: NaiveTime,
    #[case] breaks: Vec<(NaiveTime, NaiveTime)>,
) {
    let request = UpsertOpeningHoursRequest {
        opening_time,
        closing_time,
        breaks: breaks
            .into_iter()
            .map(|(start_time, end_time)| BreakRequest {
                start_time,
                end_time,
            })
            .collect(),
    };
    assert!(matches!(request.validate(), Err(BookingError::Validation(_))));
}

#[test]
fn test_unavailability_needs_exactly_one_anchor() {
    let mut request = CreateUnavailabilityRequest {
        day_of_week: Some(2),
        date: None,
        start_time: t(14, 0),
        end_time: t(16, 0),
        reason: None,
    };
    assert!(request.validate().is_ok());

    request.date = NaiveDate::from_ymd_opt(2024, 6, 4);
    assert!(request.validate().is_err());

    request.day_of_week = None;
    assert!(request.validate().is_ok());

    request.date = None;
    request.day_of_week = Some(7);
    assert!(request.validate().is_err());
}

#[test]
fn test_unavailability_applies_by_date_or_weekday() {
    let tuesday = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();
    let wednesday = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();

    assert!(applies_on(Some(2), None, tuesday));
    assert!(!applies_on(Some(2), None, wednesday));
    assert!(applies_on(None, Some(wednesday), wednesday));
    assert!(!applies_on(None, Some(wednesday), tuesday));
}

#[test]
fn test_request_validation_rejects_blank_fields() {
    let name: String = Name().fake();
    let establishment = CreateEstablishmentRequest {
        name,
        phone: None,
        address: None,
        timezone: Some("Europe/Lisbon".to_string()),
    };
    assert!(establishment.validate().is_ok());

    let bad_zone = CreateEstablishmentRequest {
        timezone: Some("Mars/Olympus".to_string()),
        ..establishment.clone()
    };
    assert!(bad_zone.validate().is_err());

    let service = CreateServiceRequest {
        category_id: None,
        name: "Haircut".to_string(),
        description: None,
        duration_minutes: 0,
        price_cents: 2500,
    };
    assert!(service.validate().is_err());

    let booking = PublicBookingRequest {
        service_id: Uuid::new_v4(),
        employee_id: None,
        start_time: Utc::now(),
        customer_name: "   ".to_string(),
        customer_phone: "+5511999990000".to_string(),
        customer_email: None,
        notes: None,
    };
    assert!(booking.validate().is_err());
}

#[test]
fn test_period_must_be_ordered() {
    let now = Utc::now();
    let period = PeriodQuery { from: now, to: now };
    assert!(period.validate().is_err());
    let period = PeriodQuery {
        from: now,
        to: now + chrono::Duration::days(7),
    };
    assert!(period.validate().is_ok());
}

#[test]
fn test_onboarding_and_loyalty_flags() {
    assert!(!OnboardingCheck::new(true, true, false).completed);
    assert!(OnboardingCheck::new(true, true, true).completed);

    let program = Uuid::new_v4();
    let customer = Uuid::new_v4();
    assert!(!LoyaltyBalance::new(program, customer, 9, 10).reward_available);
    assert!(LoyaltyBalance::new(program, customer, 10, 10).reward_available);
}

#[test]
fn test_status_counts_accumulate() {
    let mut counts = StatusCounts::default();
    counts.record(AppointmentStatus::Completed, 4);
    counts.record(AppointmentStatus::Cancelled, 1);
    counts.record(AppointmentStatus::Completed, 2);

    assert_eq!(counts.completed, 6);
    assert_eq!(counts.cancelled, 1);
    assert_eq!(counts.total(), 7);
}
