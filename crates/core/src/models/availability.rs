use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableSlotsQuery {
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub employee_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableSlot {
    /// Local start time as `"HH:MM"`
    pub time: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub employee_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableSlotsResponse {
    pub date: NaiveDate,
    pub service_id: Uuid,
    pub duration_minutes: i32,
    pub available_slots: Vec<AvailableSlot>,
}

impl AvailableSlotsResponse {
    pub fn find_slot(&self, start: DateTime<Utc>, employee_id: Option<Uuid>) -> Option<&AvailableSlot> {
        self.available_slots.iter().find(|slot| {
            slot.start == start && employee_id.is_none_or(|id| slot.employee_ids.contains(&id))
        })
    }
}
