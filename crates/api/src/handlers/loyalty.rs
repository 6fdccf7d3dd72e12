use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use salonbook_core::{
    errors::BookingError,
    models::loyalty::{
        CreateLoyaltyProgramRequest, LoyaltyBalance, LoyaltyProgram, RedeemRewardRequest,
        UpdateLoyaltyProgramRequest,
    },
};
use salonbook_db::repositories::{loyalty, ownership::Owned};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{error_handling::AppError, scope::EstablishmentScope},
    services::ownership::ensure_owned,
};

#[axum::debug_handler]
pub async fn list_programs(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
) -> Result<Json<Vec<LoyaltyProgram>>, AppError> {
    let rows = loyalty::list_programs(&state.db_pool, scope.id()).await?;
    Ok(Json(rows.into_iter().map(LoyaltyProgram::from).collect()))
}

#[axum::debug_handler]
pub async fn create_program(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Json(payload): Json<CreateLoyaltyProgramRequest>,
) -> Result<(StatusCode, Json<LoyaltyProgram>), AppError> {
    payload.validate()?;
    ensure_owned(
        &state.db_pool,
        scope.id(),
        Owned::Service,
        payload.bonus_service_id,
    )
    .await?;

    let row = loyalty::create_program(&state.db_pool, scope.id(), &payload).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

#[axum::debug_handler]
pub async fn update_program(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLoyaltyProgramRequest>,
) -> Result<Json<LoyaltyProgram>, AppError> {
    payload.validate()?;
    if let Some(service_id) = payload.bonus_service_id {
        ensure_owned(&state.db_pool, scope.id(), Owned::Service, service_id).await?;
    }

    let row = loyalty::update_program(&state.db_pool, scope.id(), id, &payload)
        .await?
        .ok_or_else(|| BookingError::not_found("Loyalty program", id))?;
    Ok(Json(row.into()))
}

#[axum::debug_handler]
pub async fn delete_program(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !loyalty::delete_program(&state.db_pool, scope.id(), id).await? {
        return Err(BookingError::not_found("Loyalty program", id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Spends one reward's worth of points.
#[axum::debug_handler]
pub async fn redeem_reward(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<RedeemRewardRequest>,
) -> Result<Json<LoyaltyBalance>, AppError> {
    let program = loyalty::get_program(&state.db_pool, scope.id(), id)
        .await?
        .ok_or_else(|| BookingError::not_found("Loyalty program", id))?;
    ensure_owned(&state.db_pool, scope.id(), Owned::Customer, payload.customer_id).await?;

    let balance = loyalty::redeem_reward(&state.db_pool, &program, payload.customer_id)
        .await?
        .ok_or_else(|| {
            BookingError::Conflict(format!(
                "Customer {} needs {} points to redeem {}",
                payload.customer_id, program.points_required, program.name
            ))
        })?;

    tracing::info!(
        "Customer {} redeemed a reward from program {}",
        payload.customer_id,
        program.id
    );
    Ok(Json(LoyaltyBalance::new(
        balance.program_id,
        balance.customer_id,
        balance.points,
        balance.points_required,
    )))
}
