use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;
use uuid::Uuid;

use crate::models::{
    DbAppointment, DbEmployee, DbEstablishment, DbInterval, DbOpeningHours, DbService,
    DbUnavailability,
};
use crate::source::AvailabilitySource;

// Mock availability reads for testing
mock! {
    pub AvailabilitySource {}

    #[async_trait]
    impl AvailabilitySource for AvailabilitySource {
        async fn establishment(&self, establishment_id: Uuid) -> eyre::Result<Option<DbEstablishment>>;

        async fn service(
            &self,
            establishment_id: Uuid,
            service_id: Uuid,
        ) -> eyre::Result<Option<DbService>>;

        async fn opening_hours(
            &self,
            establishment_id: Uuid,
            day_of_week: i16,
        ) -> eyre::Result<Option<DbOpeningHours>>;

        async fn breaks(&self, opening_hour_id: Uuid) -> eyre::Result<Vec<DbInterval>>;

        async fn employees(
            &self,
            establishment_id: Uuid,
            employee_id: Option<Uuid>,
        ) -> eyre::Result<Vec<DbEmployee>>;

        async fn appointments(
            &self,
            employee_ids: &[Uuid],
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> eyre::Result<Vec<DbAppointment>>;

        async fn unavailabilities(&self, employee_ids: &[Uuid]) -> eyre::Result<Vec<DbUnavailability>>;
    }
}
