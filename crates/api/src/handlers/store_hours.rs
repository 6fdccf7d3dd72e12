use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use salonbook_core::{
    errors::BookingError,
    models::store_hours::{OpeningHours, UpsertOpeningHoursRequest},
    slots::{DayTemplate, weekly_template},
    time::validate_day_of_week,
};
use salonbook_db::repositories::store_hours;
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{error_handling::AppError, scope::EstablishmentScope},
};

#[axum::debug_handler]
pub async fn list_store_hours(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
) -> Result<Json<Vec<OpeningHours>>, AppError> {
    let hours = store_hours::list_opening_hours(&state.db_pool, scope.id()).await?;
    Ok(Json(hours))
}

/// Sets the hours of one weekday (0 = Sunday), replacing its breaks.
#[axum::debug_handler]
pub async fn upsert_store_hours(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(day): Path<i16>,
    Json(payload): Json<UpsertOpeningHoursRequest>,
) -> Result<Json<OpeningHours>, AppError> {
    validate_day_of_week(day)?;
    payload.validate()?;

    let hours = store_hours::upsert_opening_hours(&state.db_pool, scope.id(), day, &payload).await?;
    tracing::info!(
        "Establishment {} opens {} to {} on day {}",
        scope.id(),
        hours.opening_time,
        hours.closing_time,
        day
    );
    Ok(Json(hours))
}

#[axum::debug_handler]
pub async fn delete_store_hours(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(day): Path<i16>,
) -> Result<StatusCode, AppError> {
    validate_day_of_week(day)?;
    if !store_hours::delete_opening_hours(&state.db_pool, scope.id(), day).await? {
        return Err(BookingError::NotFound(format!("No store hours set for day {}", day)).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Weekly slot grid used by the booking calendar.
#[axum::debug_handler]
pub async fn get_weekly_slots(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
) -> Result<Json<Vec<DayTemplate>>, AppError> {
    let hours = store_hours::list_opening_hours(&state.db_pool, scope.id()).await?;
    Ok(Json(weekly_template(&hours, state.slot_interval_minutes)))
}
