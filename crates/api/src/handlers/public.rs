//! Unauthenticated booking flow. The establishment comes from the path
//! rather than the scope header.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use salonbook_core::{
    errors::BookingError,
    models::{
        appointment::{Appointment, PublicBookingRequest},
        availability::{AvailableSlotsQuery, AvailableSlotsResponse},
        service::Service,
    },
    time::{parse_timezone, utc_to_local},
};
use salonbook_db::{
    models::DbEstablishment,
    repositories::{catalog, establishment},
    source::PgAvailabilitySource,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::error_handling::AppError,
    services::{availability::find_available_slots, booking},
};

async fn load_establishment(state: &ApiState, id: Uuid) -> Result<DbEstablishment, AppError> {
    let row = establishment::get_establishment_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| BookingError::not_found("Establishment", id))?;
    Ok(row)
}

#[axum::debug_handler]
pub async fn list_public_services(
    State(state): State<Arc<ApiState>>,
    Path(establishment_id): Path<Uuid>,
) -> Result<Json<Vec<Service>>, AppError> {
    load_establishment(&state, establishment_id).await?;
    let rows = catalog::list_services(&state.db_pool, establishment_id, true).await?;
    Ok(Json(rows.into_iter().map(Service::from).collect()))
}

#[axum::debug_handler]
pub async fn get_public_available_slots(
    State(state): State<Arc<ApiState>>,
    Path(establishment_id): Path<Uuid>,
    Query(query): Query<AvailableSlotsQuery>,
) -> Result<Json<AvailableSlotsResponse>, AppError> {
    let source = PgAvailabilitySource::new(&state.db_pool);
    let response = find_available_slots(
        &source,
        establishment_id,
        &query,
        state.slot_interval_minutes,
        Utc::now(),
    )
    .await?;
    Ok(Json(response))
}

/// Books one of the slots offered by [`get_public_available_slots`]. The
/// customer is matched by phone number or created.
#[axum::debug_handler]
pub async fn create_public_booking(
    State(state): State<Arc<ApiState>>,
    Path(establishment_id): Path<Uuid>,
    Json(payload): Json<PublicBookingRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    payload.validate()?;

    let row = load_establishment(&state, establishment_id).await?;
    let tz = parse_timezone(&row.timezone)?;
    let query = AvailableSlotsQuery {
        service_id: payload.service_id,
        date: utc_to_local(tz, payload.start_time).date(),
        employee_id: payload.employee_id,
    };

    let source = PgAvailabilitySource::new(&state.db_pool);
    let availability = find_available_slots(
        &source,
        establishment_id,
        &query,
        state.slot_interval_minutes,
        Utc::now(),
    )
    .await?;

    let appointment =
        booking::book_public(&state.db_pool, establishment_id, &availability, &payload).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}
