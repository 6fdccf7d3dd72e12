use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};
use crate::models::require_non_empty;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    CheckedIn,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::CheckedIn,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::CheckedIn => "checked_in",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the appointment still occupies its employee's time.
    pub fn blocks_time(&self) -> bool {
        !matches!(self, AppointmentStatus::Cancelled)
    }

    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, next),
            (Scheduled, CheckedIn)
                | (Scheduled, Completed)
                | (CheckedIn, Completed)
                | (Scheduled, Cancelled)
                | (CheckedIn, Cancelled)
        )
    }

    pub fn ensure_transition(&self, next: AppointmentStatus) -> BookingResult<()> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(BookingError::validation(format!(
                "Cannot move appointment from {} to {}",
                self, next
            )))
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| BookingError::validation(format!("Unknown appointment status '{}'", s)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub employee_id: Uuid,
    pub service_id: Uuid,
    pub customer_id: Uuid,
    pub customer_package_id: Option<Uuid>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// The end time is derived from the service duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub employee_id: Uuid,
    pub service_id: Uuid,
    pub customer_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub customer_package_id: Option<Uuid>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub employee_id: Option<Uuid>,
    pub start_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodQuery {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl PeriodQuery {
    pub fn validate(&self) -> BookingResult<()> {
        if self.from >= self.to {
            return Err(BookingError::validation("'from' must be before 'to'"));
        }
        Ok(())
    }
}

/// Booking made by an end customer through the public flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicBookingRequest {
    pub service_id: Uuid,
    pub employee_id: Option<Uuid>,
    pub start_time: DateTime<Utc>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub notes: Option<String>,
}

impl PublicBookingRequest {
    pub fn validate(&self) -> BookingResult<()> {
        require_non_empty("customer_name", &self.customer_name)?;
        require_non_empty("customer_phone", &self.customer_phone)
    }
}
