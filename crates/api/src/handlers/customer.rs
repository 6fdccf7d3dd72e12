use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use salonbook_core::{
    errors::BookingError,
    models::{
        customer::{CreateCustomerRequest, Customer, UpdateCustomerRequest},
        loyalty::LoyaltyBalance,
        package::CustomerPackage,
    },
};
use salonbook_db::repositories::{customer, loyalty, package};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{error_handling::AppError, scope::EstablishmentScope},
};

#[axum::debug_handler]
pub async fn list_customers(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
) -> Result<Json<Vec<Customer>>, AppError> {
    let rows = customer::list_customers(&state.db_pool, scope.id()).await?;
    Ok(Json(rows.into_iter().map(Customer::from).collect()))
}

#[axum::debug_handler]
pub async fn create_customer(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    payload.validate()?;
    let row = customer::create_customer(&state.db_pool, scope.id(), &payload).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

#[axum::debug_handler]
pub async fn get_customer(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
) -> Result<Json<Customer>, AppError> {
    let row = customer::get_customer(&state.db_pool, scope.id(), id)
        .await?
        .ok_or_else(|| BookingError::not_found("Customer", id))?;
    Ok(Json(row.into()))
}

#[axum::debug_handler]
pub async fn update_customer(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> Result<Json<Customer>, AppError> {
    payload.validate()?;
    let row = customer::update_customer(&state.db_pool, scope.id(), id, &payload)
        .await?
        .ok_or_else(|| BookingError::not_found("Customer", id))?;
    Ok(Json(row.into()))
}

#[axum::debug_handler]
pub async fn delete_customer(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !customer::delete_customer(&state.db_pool, scope.id(), id).await? {
        return Err(BookingError::not_found("Customer", id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn list_customer_packages(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CustomerPackage>>, AppError> {
    customer::get_customer(&state.db_pool, scope.id(), id)
        .await?
        .ok_or_else(|| BookingError::not_found("Customer", id))?;

    let rows = package::list_customer_packages(&state.db_pool, id).await?;
    Ok(Json(rows.into_iter().map(CustomerPackage::from).collect()))
}

#[axum::debug_handler]
pub async fn list_loyalty_balances(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<LoyaltyBalance>>, AppError> {
    customer::get_customer(&state.db_pool, scope.id(), id)
        .await?
        .ok_or_else(|| BookingError::not_found("Customer", id))?;

    let rows = loyalty::list_balances_for_customer(&state.db_pool, scope.id(), id).await?;
    Ok(Json(
        rows.into_iter()
            .map(|b| LoyaltyBalance::new(b.program_id, b.customer_id, b.points, b.points_required))
            .collect(),
    ))
}
