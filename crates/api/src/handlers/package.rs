use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use salonbook_core::{
    errors::BookingError,
    models::package::{
        CreatePackageRequest, CustomerPackage, Package, PurchasePackageRequest,
        UpdatePackageRequest,
    },
};
use salonbook_db::repositories::{ownership::Owned, package};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{error_handling::AppError, scope::EstablishmentScope},
    services::ownership::ensure_owned,
};

#[axum::debug_handler]
pub async fn list_packages(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
) -> Result<Json<Vec<Package>>, AppError> {
    let rows = package::list_packages(&state.db_pool, scope.id()).await?;
    Ok(Json(rows.into_iter().map(Package::from).collect()))
}

#[axum::debug_handler]
pub async fn create_package(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Json(payload): Json<CreatePackageRequest>,
) -> Result<(StatusCode, Json<Package>), AppError> {
    payload.validate()?;
    ensure_owned(&state.db_pool, scope.id(), Owned::Service, payload.service_id).await?;

    let row = package::create_package(&state.db_pool, scope.id(), &payload).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

#[axum::debug_handler]
pub async fn get_package(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
) -> Result<Json<Package>, AppError> {
    let row = package::get_package(&state.db_pool, scope.id(), id)
        .await?
        .ok_or_else(|| BookingError::not_found("Package", id))?;
    Ok(Json(row.into()))
}

#[axum::debug_handler]
pub async fn update_package(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePackageRequest>,
) -> Result<Json<Package>, AppError> {
    payload.validate()?;
    let row = package::update_package(&state.db_pool, scope.id(), id, &payload)
        .await?
        .ok_or_else(|| BookingError::not_found("Package", id))?;
    Ok(Json(row.into()))
}

#[axum::debug_handler]
pub async fn delete_package(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !package::delete_package(&state.db_pool, scope.id(), id).await? {
        return Err(BookingError::not_found("Package", id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn purchase_package(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<PurchasePackageRequest>,
) -> Result<(StatusCode, Json<CustomerPackage>), AppError> {
    let offer = package::get_package(&state.db_pool, scope.id(), id)
        .await?
        .ok_or_else(|| BookingError::not_found("Package", id))?;
    if !offer.active {
        return Err(BookingError::validation(format!("Package {} is no longer sold", id)).into());
    }
    ensure_owned(&state.db_pool, scope.id(), Owned::Customer, payload.customer_id).await?;

    let purchase = package::purchase_package(&state.db_pool, &offer, payload.customer_id).await?;
    tracing::info!(
        "Customer {} bought package {} ({} sessions)",
        payload.customer_id,
        offer.id,
        purchase.remaining_sessions
    );
    Ok((StatusCode::CREATED, Json(purchase.into())))
}
