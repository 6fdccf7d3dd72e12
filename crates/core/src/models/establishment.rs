use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::BookingResult;
use crate::models::require_non_empty;
use crate::time::parse_timezone;

pub const DEFAULT_TIMEZONE: &str = "UTC";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Establishment {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub timezone: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEstablishmentRequest {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub timezone: Option<String>,
}

impl CreateEstablishmentRequest {
    pub fn validate(&self) -> BookingResult<()> {
        require_non_empty("name", &self.name)?;
        if let Some(timezone) = &self.timezone {
            parse_timezone(timezone)?;
        }
        Ok(())
    }

    pub fn timezone_or_default(&self) -> &str {
        self.timezone.as_deref().unwrap_or(DEFAULT_TIMEZONE)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEstablishmentRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub timezone: Option<String>,
}

impl UpdateEstablishmentRequest {
    pub fn validate(&self) -> BookingResult<()> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        if let Some(timezone) = &self.timezone {
            parse_timezone(timezone)?;
        }
        Ok(())
    }
}

/// What an owner still has to configure before taking bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingCheck {
    pub has_store_hours: bool,
    pub has_services: bool,
    pub has_employees: bool,
    pub completed: bool,
}

impl OnboardingCheck {
    pub fn new(has_store_hours: bool, has_services: bool, has_employees: bool) -> Self {
        Self {
            has_store_hours,
            has_services,
            has_employees,
            completed: has_store_hours && has_services && has_employees,
        }
    }
}
