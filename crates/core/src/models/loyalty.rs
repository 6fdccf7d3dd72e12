use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::BookingResult;
use crate::models::{require_non_empty, require_positive};

/// Points-accrual rule: every completed appointment earns
/// `points_per_appointment`; `points_required` buys the bonus service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoyaltyProgram {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub name: String,
    pub bonus_service_id: Uuid,
    pub points_per_appointment: i32,
    pub points_required: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoyaltyBalance {
    pub program_id: Uuid,
    pub customer_id: Uuid,
    pub points: i32,
    pub reward_available: bool,
}

impl LoyaltyBalance {
    pub fn new(program_id: Uuid, customer_id: Uuid, points: i32, points_required: i32) -> Self {
        Self {
            program_id,
            customer_id,
            points,
            reward_available: points >= points_required,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLoyaltyProgramRequest {
    pub name: String,
    pub bonus_service_id: Uuid,
    pub points_per_appointment: i32,
    pub points_required: i32,
}

impl CreateLoyaltyProgramRequest {
    pub fn validate(&self) -> BookingResult<()> {
        require_non_empty("name", &self.name)?;
        require_positive("points_per_appointment", self.points_per_appointment)?;
        require_positive("points_required", self.points_required)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateLoyaltyProgramRequest {
    pub name: Option<String>,
    pub bonus_service_id: Option<Uuid>,
    pub points_per_appointment: Option<i32>,
    pub points_required: Option<i32>,
    pub active: Option<bool>,
}

impl UpdateLoyaltyProgramRequest {
    pub fn validate(&self) -> BookingResult<()> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        if let Some(points) = self.points_per_appointment {
            require_positive("points_per_appointment", points)?;
        }
        if let Some(points) = self.points_required {
            require_positive("points_required", points)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedeemRewardRequest {
    pub customer_id: Uuid,
}
