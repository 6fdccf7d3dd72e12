//! Read seam for the availability query.
//!
//! The API's availability service only needs a handful of reads. Keeping them
//! behind a trait lets the service be exercised against a mock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use uuid::Uuid;

use crate::DbPool;
use crate::models::{
    DbAppointment, DbEmployee, DbEstablishment, DbInterval, DbOpeningHours, DbService,
    DbUnavailability,
};
use crate::repositories::{appointment, catalog, employee, establishment, store_hours, unavailability};

#[async_trait]
pub trait AvailabilitySource: Send + Sync {
    async fn establishment(&self, establishment_id: Uuid) -> Result<Option<DbEstablishment>>;

    async fn service(&self, establishment_id: Uuid, service_id: Uuid) -> Result<Option<DbService>>;

    async fn opening_hours(
        &self,
        establishment_id: Uuid,
        day_of_week: i16,
    ) -> Result<Option<DbOpeningHours>>;

    async fn breaks(&self, opening_hour_id: Uuid) -> Result<Vec<DbInterval>>;

    /// Active employees, or only `employee_id` when given.
    async fn employees(
        &self,
        establishment_id: Uuid,
        employee_id: Option<Uuid>,
    ) -> Result<Vec<DbEmployee>>;

    async fn appointments(
        &self,
        employee_ids: &[Uuid],
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<DbAppointment>>;

    async fn unavailabilities(&self, employee_ids: &[Uuid]) -> Result<Vec<DbUnavailability>>;
}

pub struct PgAvailabilitySource<'a> {
    pool: &'a DbPool,
}

impl<'a> PgAvailabilitySource<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilitySource for PgAvailabilitySource<'_> {
    async fn establishment(&self, establishment_id: Uuid) -> Result<Option<DbEstablishment>> {
        establishment::get_establishment_by_id(self.pool, establishment_id).await
    }

    async fn service(&self, establishment_id: Uuid, service_id: Uuid) -> Result<Option<DbService>> {
        catalog::get_service(self.pool, establishment_id, service_id).await
    }

    async fn opening_hours(
        &self,
        establishment_id: Uuid,
        day_of_week: i16,
    ) -> Result<Option<DbOpeningHours>> {
        store_hours::get_opening_hours_for_day(self.pool, establishment_id, day_of_week).await
    }

    async fn breaks(&self, opening_hour_id: Uuid) -> Result<Vec<DbInterval>> {
        store_hours::list_intervals(self.pool, &[opening_hour_id]).await
    }

    async fn employees(
        &self,
        establishment_id: Uuid,
        employee_id: Option<Uuid>,
    ) -> Result<Vec<DbEmployee>> {
        match employee_id {
            Some(id) => Ok(employee::get_employee(self.pool, establishment_id, id)
                .await?
                .filter(|e| e.active)
                .into_iter()
                .collect()),
            None => employee::list_employees(self.pool, establishment_id, true).await,
        }
    }

    async fn appointments(
        &self,
        employee_ids: &[Uuid],
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<DbAppointment>> {
        appointment::list_busy_for_employees(self.pool, employee_ids, from, to).await
    }

    async fn unavailabilities(&self, employee_ids: &[Uuid]) -> Result<Vec<DbUnavailability>> {
        unavailability::list_for_employees(self.pool, employee_ids).await
    }
}
