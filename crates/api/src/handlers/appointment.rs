use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use salonbook_core::{
    errors::BookingError,
    models::{
        appointment::{
            Appointment, AppointmentStatus, CreateAppointmentRequest, PeriodQuery,
            UpdateAppointmentRequest,
        },
        availability::{AvailableSlotsQuery, AvailableSlotsResponse},
    },
};
use salonbook_db::{models::DbAppointment, repositories::appointment, source::PgAvailabilitySource};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{error_handling::AppError, scope::EstablishmentScope},
    services::{availability::find_available_slots, booking},
};

fn into_appointments(rows: Vec<DbAppointment>) -> Result<Vec<Appointment>, AppError> {
    let appointments = rows
        .into_iter()
        .map(Appointment::try_from)
        .collect::<eyre::Result<Vec<_>>>()?;
    Ok(appointments)
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let rows = appointment::list_appointments(&state.db_pool, scope.id()).await?;
    Ok(Json(into_appointments(rows)?))
}

#[axum::debug_handler]
pub async fn list_appointments_by_period(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Query(period): Query<PeriodQuery>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    period.validate()?;
    let rows =
        appointment::list_appointments_by_period(&state.db_pool, scope.id(), period.from, period.to)
            .await?;
    Ok(Json(into_appointments(rows)?))
}

#[axum::debug_handler]
pub async fn get_available_slots(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Query(query): Query<AvailableSlotsQuery>,
) -> Result<Json<AvailableSlotsResponse>, AppError> {
    let source = PgAvailabilitySource::new(&state.db_pool);
    let response = find_available_slots(
        &source,
        scope.id(),
        &query,
        state.slot_interval_minutes,
        Utc::now(),
    )
    .await?;
    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let created = booking::create_appointment(&state.db_pool, scope.id(), &payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    let row = appointment::get_appointment(&state.db_pool, scope.id(), id)
        .await?
        .ok_or_else(|| BookingError::not_found("Appointment", id))?;
    Ok(Json(Appointment::try_from(row)?))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let updated = booking::reschedule_appointment(&state.db_pool, scope.id(), id, &payload).await?;
    Ok(Json(updated))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !appointment::delete_appointment(&state.db_pool, scope.id(), id).await? {
        return Err(BookingError::not_found("Appointment", id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn check_in_appointment(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    let updated =
        booking::change_status(&state.db_pool, scope.id(), id, AppointmentStatus::CheckedIn).await?;
    Ok(Json(updated))
}

#[axum::debug_handler]
pub async fn complete_appointment(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    let updated =
        booking::change_status(&state.db_pool, scope.id(), id, AppointmentStatus::Completed).await?;
    Ok(Json(updated))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    let updated =
        booking::change_status(&state.db_pool, scope.id(), id, AppointmentStatus::Cancelled).await?;
    Ok(Json(updated))
}
