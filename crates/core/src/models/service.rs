use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::BookingResult;
use crate::models::{require_non_empty, require_non_negative, require_positive};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub price_cents: i64,
}

impl CreateServiceRequest {
    pub fn validate(&self) -> BookingResult<()> {
        require_non_empty("name", &self.name)?;
        require_positive("duration_minutes", self.duration_minutes)?;
        require_non_negative("price_cents", self.price_cents)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateServiceRequest {
    pub category_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub price_cents: Option<i64>,
    pub active: Option<bool>,
}

impl UpdateServiceRequest {
    pub fn validate(&self) -> BookingResult<()> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        if let Some(duration) = self.duration_minutes {
            require_positive("duration_minutes", duration)?;
        }
        if let Some(price) = self.price_cents {
            require_non_negative("price_cents", price)?;
        }
        Ok(())
    }
}
