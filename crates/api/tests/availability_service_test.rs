mod common;

use chrono::{DateTime, NaiveDate, Utc};
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use salonbook_api::services::availability::find_available_slots;
use salonbook_core::{
    errors::BookingError,
    models::availability::{AvailableSlotsQuery, AvailableSlotsResponse},
};
use salonbook_db::{
    mock::repositories::MockAvailabilitySource,
    models::{
        DbAppointment, DbEmployee, DbEstablishment, DbInterval, DbOpeningHours, DbService,
        DbUnavailability,
    },
};
use uuid::Uuid;

use common::{
    appointment, at, employee, establishment, interval, opening_hours, service, t,
    weekly_unavailability,
};

/// Monday
const DAY: &str = "2030-01-07";
const MONDAY: i16 = 1;

fn day() -> NaiveDate {
    NaiveDate::parse_from_str(DAY, "%Y-%m-%d").unwrap()
}

fn long_ago() -> DateTime<Utc> {
    at("2029-12-01T00:00:00Z")
}

struct Fixture {
    establishment: DbEstablishment,
    service: DbService,
    hours: Option<DbOpeningHours>,
    breaks: Vec<DbInterval>,
    employees: Vec<DbEmployee>,
    appointments: Vec<DbAppointment>,
    unavailabilities: Vec<DbUnavailability>,
}

impl Fixture {
    fn new(timezone: &str, duration_minutes: i32) -> Self {
        let establishment = establishment(timezone);
        let service = service(establishment.id, duration_minutes);
        let hours = Some(opening_hours(establishment.id, MONDAY, t(9, 0), t(12, 0)));
        let employees = vec![employee(establishment.id, "Ana")];
        Self {
            establishment,
            service,
            hours,
            breaks: Vec::new(),
            employees,
            appointments: Vec::new(),
            unavailabilities: Vec::new(),
        }
    }

    fn query(&self) -> AvailableSlotsQuery {
        AvailableSlotsQuery {
            service_id: self.service.id,
            date: day(),
            employee_id: None,
        }
    }

    fn source(&self) -> MockAvailabilitySource {
        let mut source = MockAvailabilitySource::new();

        let establishment = self.establishment.clone();
        source
            .expect_establishment()
            .returning(move |_| Ok(Some(establishment.clone())));

        let service = self.service.clone();
        source
            .expect_service()
            .returning(move |_, _| Ok(Some(service.clone())));

        let hours = self.hours.clone();
        source
            .expect_opening_hours()
            .returning(move |_, _| Ok(hours.clone()));

        let breaks = self.breaks.clone();
        source.expect_breaks().returning(move |_| Ok(breaks.clone()));

        let employees = self.employees.clone();
        source.expect_employees().returning(move |_, requested| {
            Ok(employees
                .iter()
                .filter(|e| requested.is_none_or(|id| id == e.id))
                .cloned()
                .collect())
        });

        let appointments = self.appointments.clone();
        source
            .expect_appointments()
            .returning(move |_, _, _| Ok(appointments.clone()));

        let unavailabilities = self.unavailabilities.clone();
        source
            .expect_unavailabilities()
            .returning(move |_| Ok(unavailabilities.clone()));

        source
    }

    async fn run(&self, now: DateTime<Utc>) -> Result<AvailableSlotsResponse, BookingError> {
        find_available_slots(&self.source(), self.establishment.id, &self.query(), 30, now).await
    }
}

fn times(response: &AvailableSlotsResponse) -> Vec<&str> {
    response
        .available_slots
        .iter()
        .map(|slot| slot.time.as_str())
        .collect()
}

#[test_log::test(tokio::test)]
async fn booked_hour_removes_every_overlapping_start() {
    let mut fixture = Fixture::new("UTC", 60);
    let busy = appointment(
        &fixture.employees[0],
        &fixture.service,
        at("2030-01-07T10:00:00Z"),
        at("2030-01-07T11:00:00Z"),
        "scheduled",
    );
    fixture.appointments.push(busy);

    let response = fixture.run(long_ago()).await.unwrap();

    assert_eq!(times(&response), vec!["09:00", "11:00"]);
    assert_eq!(response.duration_minutes, 60);
    assert_eq!(response.available_slots[1].end, at("2030-01-07T12:00:00Z"));
}

#[test_log::test(tokio::test)]
async fn cancelled_appointments_free_their_time() {
    let mut fixture = Fixture::new("UTC", 60);
    let cancelled = appointment(
        &fixture.employees[0],
        &fixture.service,
        at("2030-01-07T10:00:00Z"),
        at("2030-01-07T11:00:00Z"),
        "cancelled",
    );
    fixture.appointments.push(cancelled);

    let response = fixture.run(long_ago()).await.unwrap();

    assert_eq!(
        times(&response),
        vec!["09:00", "09:30", "10:00", "10:30", "11:00"]
    );
}

#[test_log::test(tokio::test)]
async fn breaks_are_never_offered() {
    let mut fixture = Fixture::new("UTC", 30);
    let hours_id = fixture.hours.as_ref().unwrap().id;
    fixture.breaks.push(interval(hours_id, t(10, 0), t(10, 30)));

    let response = fixture.run(long_ago()).await.unwrap();

    assert_eq!(
        times(&response),
        vec!["09:00", "09:30", "10:30", "11:00", "11:30"]
    );
}

#[test_log::test(tokio::test)]
async fn closed_day_has_no_slots() {
    let fixture = Fixture::new("UTC", 30);

    let mut source = MockAvailabilitySource::new();
    let establishment = fixture.establishment.clone();
    source
        .expect_establishment()
        .returning(move |_| Ok(Some(establishment.clone())));
    let service = fixture.service.clone();
    source
        .expect_service()
        .returning(move |_, _| Ok(Some(service.clone())));
    source.expect_opening_hours().returning(|_, _| Ok(None));
    source.expect_employees().never();
    source.expect_appointments().never();

    let response = find_available_slots(
        &source,
        fixture.establishment.id,
        &fixture.query(),
        30,
        long_ago(),
    )
    .await
    .unwrap();

    assert!(response.available_slots.is_empty());
}

#[test_log::test(tokio::test)]
async fn hours_are_local_to_the_establishment() {
    // Sao Paulo has been UTC-3 all year since 2019.
    let mut fixture = Fixture::new("America/Sao_Paulo", 30);
    fixture.hours = Some(opening_hours(
        fixture.establishment.id,
        MONDAY,
        t(9, 0),
        t(10, 0),
    ));
    let busy = appointment(
        &fixture.employees[0],
        &fixture.service,
        at("2030-01-07T12:00:00Z"),
        at("2030-01-07T12:30:00Z"),
        "checked_in",
    );
    fixture.appointments.push(busy);

    let response = fixture.run(long_ago()).await.unwrap();

    assert_eq!(times(&response), vec!["09:30"]);
    assert_eq!(response.available_slots[0].start, at("2030-01-07T12:30:00Z"));
    assert_eq!(response.available_slots[0].end, at("2030-01-07T13:00:00Z"));
}

#[test_log::test(tokio::test)]
async fn slots_list_only_free_employees() {
    let mut fixture = Fixture::new("UTC", 60);
    let bruno = employee(fixture.establishment.id, "Bruno");
    let ana = fixture.employees[0].clone();
    fixture.employees.push(bruno.clone());
    let busy = appointment(
        &ana,
        &fixture.service,
        at("2030-01-07T09:00:00Z"),
        at("2030-01-07T12:00:00Z"),
        "scheduled",
    );
    fixture.appointments.push(busy);

    let response = fixture.run(long_ago()).await.unwrap();

    assert_eq!(response.available_slots.len(), 5);
    for slot in &response.available_slots {
        assert_eq!(slot.employee_ids, vec![bruno.id]);
    }
}

#[test_log::test(tokio::test)]
async fn weekly_unavailability_blocks_the_employee() {
    let mut fixture = Fixture::new("UTC", 30);
    let ana = fixture.employees[0].id;
    fixture
        .unavailabilities
        .push(weekly_unavailability(ana, MONDAY, t(9, 0), t(10, 0)));

    let response = fixture.run(long_ago()).await.unwrap();

    assert_eq!(times(&response), vec!["10:00", "10:30", "11:00", "11:30"]);
}

#[test_log::test(tokio::test)]
async fn past_starts_are_dropped_for_today() {
    let fixture = Fixture::new("UTC", 60);

    let response = fixture.run(at("2030-01-07T10:15:00Z")).await.unwrap();

    assert_eq!(times(&response), vec!["10:30", "11:00"]);
}

#[test_log::test(tokio::test)]
async fn unknown_employee_is_not_found() {
    let fixture = Fixture::new("UTC", 30);
    let missing = Uuid::new_v4();
    let mut query = fixture.query();
    query.employee_id = Some(missing);

    let mut source = MockAvailabilitySource::new();
    let establishment = fixture.establishment.clone();
    source
        .expect_establishment()
        .returning(move |_| Ok(Some(establishment.clone())));
    let service = fixture.service.clone();
    source
        .expect_service()
        .returning(move |_, _| Ok(Some(service.clone())));
    let hours = fixture.hours.clone();
    source
        .expect_opening_hours()
        .with(eq(fixture.establishment.id), eq(MONDAY))
        .returning(move |_, _| Ok(hours.clone()));
    source.expect_breaks().returning(|_| Ok(Vec::new()));
    source
        .expect_employees()
        .with(eq(fixture.establishment.id), eq(Some(missing)))
        .times(1)
        .returning(|_, _| Ok(Vec::new()));

    let result = find_available_slots(
        &source,
        fixture.establishment.id,
        &query,
        30,
        long_ago(),
    )
    .await;

    assert!(matches!(result, Err(BookingError::NotFound(_))));
}

#[test_log::test(tokio::test)]
async fn inactive_service_cannot_be_booked() {
    let mut fixture = Fixture::new("UTC", 30);
    fixture.service.active = false;

    let result = fixture.run(long_ago()).await;

    assert!(matches!(result, Err(BookingError::Validation(_))));
}

#[test_log::test(tokio::test)]
async fn unknown_service_is_not_found() {
    let fixture = Fixture::new("UTC", 30);
    let mut source = MockAvailabilitySource::new();
    let establishment = fixture.establishment.clone();
    source
        .expect_establishment()
        .returning(move |_| Ok(Some(establishment.clone())));
    source.expect_service().returning(|_, _| Ok(None));

    let result = find_available_slots(
        &source,
        fixture.establishment.id,
        &fixture.query(),
        30,
        long_ago(),
    )
    .await;

    assert!(matches!(result, Err(BookingError::NotFound(_))));
}
