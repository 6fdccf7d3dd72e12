use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eyre::eyre;
use salonbook_core::models::{
    appointment::{Appointment, AppointmentStatus},
    category::Category,
    customer::Customer,
    employee::Employee,
    establishment::Establishment,
    loyalty::LoyaltyProgram,
    package::{CustomerPackage, Package},
    service::Service,
    store_hours::{BreakInterval, OpeningHours},
    unavailability::Unavailability,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEstablishment {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub timezone: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCategory {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub price_cents: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEmployee {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCustomer {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub employee_id: Uuid,
    pub service_id: Uuid,
    pub customer_id: Uuid,
    pub customer_package_id: Option<Uuid>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub notes: Option<String>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbOpeningHours {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub day_of_week: i16,
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbInterval {
    pub id: Uuid,
    pub opening_hour_id: Uuid,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUnavailability {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub day_of_week: Option<i16>,
    pub date: Option<NaiveDate>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPackage {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub service_id: Uuid,
    pub name: String,
    pub sessions: i32,
    pub price_cents: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCustomerPackage {
    pub id: Uuid,
    pub package_id: Uuid,
    pub customer_id: Uuid,
    pub remaining_sessions: i32,
    pub purchased_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbLoyaltyProgram {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub name: String,
    pub bonus_service_id: Uuid,
    pub points_per_appointment: i32,
    pub points_required: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbLoyaltyBalance {
    pub program_id: Uuid,
    pub customer_id: Uuid,
    pub points: i32,
    pub points_required: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbStatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbServiceMetric {
    pub service_id: Uuid,
    pub name: String,
    pub appointments: i64,
    pub revenue_cents: i64,
}

impl From<DbEstablishment> for Establishment {
    fn from(row: DbEstablishment) -> Self {
        Establishment {
            id: row.id,
            name: row.name,
            phone: row.phone,
            address: row.address,
            timezone: row.timezone,
            created_at: row.created_at,
        }
    }
}

impl From<DbCategory> for Category {
    fn from(row: DbCategory) -> Self {
        Category {
            id: row.id,
            establishment_id: row.establishment_id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

impl From<DbService> for Service {
    fn from(row: DbService) -> Self {
        Service {
            id: row.id,
            establishment_id: row.establishment_id,
            category_id: row.category_id,
            name: row.name,
            description: row.description,
            duration_minutes: row.duration_minutes,
            price_cents: row.price_cents,
            active: row.active,
            created_at: row.created_at,
        }
    }
}

impl From<DbEmployee> for Employee {
    fn from(row: DbEmployee) -> Self {
        Employee {
            id: row.id,
            establishment_id: row.establishment_id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            active: row.active,
            created_at: row.created_at,
        }
    }
}

impl From<DbCustomer> for Customer {
    fn from(row: DbCustomer) -> Self {
        Customer {
            id: row.id,
            establishment_id: row.establishment_id,
            name: row.name,
            phone: row.phone,
            email: row.email,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

impl DbAppointment {
    pub fn parsed_status(&self) -> eyre::Result<AppointmentStatus> {
        self.status
            .parse()
            .map_err(|_| eyre!("Appointment {} has unknown status '{}'", self.id, self.status))
    }
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = eyre::Report;

    fn try_from(row: DbAppointment) -> Result<Self, Self::Error> {
        let status = row.parsed_status()?;
        Ok(Appointment {
            id: row.id,
            establishment_id: row.establishment_id,
            employee_id: row.employee_id,
            service_id: row.service_id,
            customer_id: row.customer_id,
            customer_package_id: row.customer_package_id,
            start_time: row.start_time,
            end_time: row.end_time,
            status,
            notes: row.notes,
            checked_in_at: row.checked_in_at,
            created_at: row.created_at,
        })
    }
}

impl From<DbInterval> for BreakInterval {
    fn from(row: DbInterval) -> Self {
        BreakInterval {
            id: row.id,
            opening_hour_id: row.opening_hour_id,
            start_time: row.start_time,
            end_time: row.end_time,
        }
    }
}

impl DbOpeningHours {
    /// Attaches the breaks belonging to this row, ignoring any others.
    pub fn with_breaks(self, intervals: &[DbInterval]) -> OpeningHours {
        let mut breaks: Vec<BreakInterval> = intervals
            .iter()
            .filter(|interval| interval.opening_hour_id == self.id)
            .cloned()
            .map(BreakInterval::from)
            .collect();
        breaks.sort_by_key(|b| b.start_time);

        OpeningHours {
            id: self.id,
            establishment_id: self.establishment_id,
            day_of_week: self.day_of_week,
            opening_time: self.opening_time,
            closing_time: self.closing_time,
            breaks,
        }
    }
}

impl From<DbUnavailability> for Unavailability {
    fn from(row: DbUnavailability) -> Self {
        Unavailability {
            id: row.id,
            employee_id: row.employee_id,
            day_of_week: row.day_of_week,
            date: row.date,
            start_time: row.start_time,
            end_time: row.end_time,
            reason: row.reason,
            created_at: row.created_at,
        }
    }
}

impl From<DbPackage> for Package {
    fn from(row: DbPackage) -> Self {
        Package {
            id: row.id,
            establishment_id: row.establishment_id,
            service_id: row.service_id,
            name: row.name,
            sessions: row.sessions,
            price_cents: row.price_cents,
            active: row.active,
            created_at: row.created_at,
        }
    }
}

impl From<DbCustomerPackage> for CustomerPackage {
    fn from(row: DbCustomerPackage) -> Self {
        CustomerPackage {
            id: row.id,
            package_id: row.package_id,
            customer_id: row.customer_id,
            remaining_sessions: row.remaining_sessions,
            purchased_at: row.purchased_at,
        }
    }
}

impl From<DbLoyaltyProgram> for LoyaltyProgram {
    fn from(row: DbLoyaltyProgram) -> Self {
        LoyaltyProgram {
            id: row.id,
            establishment_id: row.establishment_id,
            name: row.name,
            bonus_service_id: row.bonus_service_id,
            points_per_appointment: row.points_per_appointment,
            points_required: row.points_required,
            active: row.active,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{
        Fake,
        faker::{name::en::Name, phone_number::en::PhoneNumber},
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn appointment_row(status: &str) -> DbAppointment {
        let now = Utc::now();
        DbAppointment {
            id: Uuid::new_v4(),
            establishment_id: Uuid::new_v4(),
            employee_id: Uuid::new_v4(),
            service_id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            customer_package_id: None,
            start_time: now,
            end_time: now,
            status: status.to_string(),
            notes: None,
            checked_in_at: None,
            created_at: now,
        }
    }

    #[test]
    fn opening_hours_keep_only_their_breaks_sorted() {
        let row = DbOpeningHours {
            id: Uuid::new_v4(),
            establishment_id: Uuid::new_v4(),
            day_of_week: 3,
            opening_time: t(9, 0),
            closing_time: t(18, 0),
        };
        let intervals = vec![
            DbInterval {
                id: Uuid::new_v4(),
                opening_hour_id: row.id,
                start_time: t(15, 0),
                end_time: t(15, 15),
            },
            DbInterval {
                id: Uuid::new_v4(),
                opening_hour_id: Uuid::new_v4(),
                start_time: t(10, 0),
                end_time: t(10, 30),
            },
            DbInterval {
                id: Uuid::new_v4(),
                opening_hour_id: row.id,
                start_time: t(12, 0),
                end_time: t(13, 0),
            },
        ];

        let hours = row.with_breaks(&intervals);

        let starts: Vec<NaiveTime> = hours.breaks.iter().map(|b| b.start_time).collect();
        assert_eq!(starts, vec![t(12, 0), t(15, 0)]);
    }

    #[rstest]
    #[case("scheduled", AppointmentStatus::Scheduled)]
    #[case("checked_in", AppointmentStatus::CheckedIn)]
    #[case("completed", AppointmentStatus::Completed)]
    #[case("cancelled", AppointmentStatus::Cancelled)]
    fn stored_status_converts(#[case] stored: &str, #[case] expected: AppointmentStatus) {
        let appointment = Appointment::try_from(appointment_row(stored)).unwrap();
        assert_eq!(appointment.status, expected);
    }

    #[rstest]
    #[case("no_show")]
    #[case("Scheduled")]
    #[case("")]
    fn unknown_status_fails_conversion(#[case] stored: &str) {
        assert!(Appointment::try_from(appointment_row(stored)).is_err());
    }

    #[test]
    fn customer_row_keeps_contact_fields() {
        let name: String = Name().fake();
        let phone: String = PhoneNumber().fake();
        let row = DbCustomer {
            id: Uuid::new_v4(),
            establishment_id: Uuid::new_v4(),
            name: name.clone(),
            phone: Some(phone.clone()),
            email: None,
            notes: None,
            created_at: Utc::now(),
        };

        let customer = Customer::from(row);

        assert_eq!(customer.name, name);
        assert_eq!(customer.phone, Some(phone));
    }
}
