use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::appointment::AppointmentStatus;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub scheduled: i64,
    pub checked_in: i64,
    pub completed: i64,
    pub cancelled: i64,
}

impl StatusCounts {
    pub fn total(&self) -> i64 {
        self.scheduled + self.checked_in + self.completed + self.cancelled
    }

    pub fn record(&mut self, status: AppointmentStatus, count: i64) {
        let slot = match status {
            AppointmentStatus::Scheduled => &mut self.scheduled,
            AppointmentStatus::CheckedIn => &mut self.checked_in,
            AppointmentStatus::Completed => &mut self.completed,
            AppointmentStatus::Cancelled => &mut self.cancelled,
        };
        *slot += count;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceMetric {
    pub service_id: Uuid,
    pub name: String,
    pub appointments: i64,
    pub revenue_cents: i64,
}

/// Revenue and volume for a period. Revenue counts completed appointments only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metrics {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub total_appointments: i64,
    pub by_status: StatusCounts,
    pub revenue_cents: i64,
    pub new_customers: i64,
    pub top_services: Vec<ServiceMetric>,
}
