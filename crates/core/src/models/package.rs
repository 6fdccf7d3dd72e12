use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::BookingResult;
use crate::models::{require_non_empty, require_non_negative, require_positive};

/// Pre-purchased bundle of sessions of one service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub service_id: Uuid,
    pub name: String,
    pub sessions: i32,
    pub price_cents: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerPackage {
    pub id: Uuid,
    pub package_id: Uuid,
    pub customer_id: Uuid,
    pub remaining_sessions: i32,
    pub purchased_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePackageRequest {
    pub service_id: Uuid,
    pub name: String,
    pub sessions: i32,
    pub price_cents: i64,
}

impl CreatePackageRequest {
    pub fn validate(&self) -> BookingResult<()> {
        require_non_empty("name", &self.name)?;
        require_positive("sessions", self.sessions)?;
        require_non_negative("price_cents", self.price_cents)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePackageRequest {
    pub name: Option<String>,
    pub sessions: Option<i32>,
    pub price_cents: Option<i64>,
    pub active: Option<bool>,
}

impl UpdatePackageRequest {
    pub fn validate(&self) -> BookingResult<()> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        if let Some(sessions) = self.sessions {
            require_positive("sessions", sessions)?;
        }
        if let Some(price) = self.price_cents {
            require_non_negative("price_cents", price)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchasePackageRequest {
    pub customer_id: Uuid,
}
