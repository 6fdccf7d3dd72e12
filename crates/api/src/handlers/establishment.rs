use axum::{Json, extract::State, http::StatusCode};
use salonbook_core::models::establishment::{
    CreateEstablishmentRequest, Establishment, OnboardingCheck, UpdateEstablishmentRequest,
};
use salonbook_db::repositories::establishment;
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{error_handling::AppError, scope::EstablishmentScope},
};

/// Registers a new establishment. This is the only administrative route that
/// is not scoped, since the caller has no establishment yet.
#[axum::debug_handler]
pub async fn create_establishment(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateEstablishmentRequest>,
) -> Result<(StatusCode, Json<Establishment>), AppError> {
    payload.validate()?;

    let row = establishment::create_establishment(
        &state.db_pool,
        payload.name.trim(),
        payload.phone.as_deref(),
        payload.address.as_deref(),
        payload.timezone_or_default(),
    )
    .await?;

    tracing::info!("Registered establishment {} ({})", row.id, row.name);
    Ok((StatusCode::CREATED, Json(row.into())))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn get_establishment(scope: EstablishmentScope) -> Json<Establishment> {
    Json(scope.establishment)
}

#[axum::debug_handler]
pub async fn update_establishment(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Json(payload): Json<UpdateEstablishmentRequest>,
) -> Result<Json<Establishment>, AppError> {
    payload.validate()?;

    let row = establishment::update_establishment(
        &state.db_pool,
        scope.id(),
        payload.name.as_deref().map(str::trim),
        payload.phone.as_deref(),
        payload.address.as_deref(),
        payload.timezone.as_deref(),
    )
    .await?;

    Ok(Json(row.into()))
}

#[axum::debug_handler]
pub async fn get_onboarding_check(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
) -> Result<Json<OnboardingCheck>, AppError> {
    let (has_store_hours, has_services, has_employees) =
        establishment::onboarding_status(&state.db_pool, scope.id()).await?;

    Ok(Json(OnboardingCheck::new(
        has_store_hours,
        has_services,
        has_employees,
    )))
}
