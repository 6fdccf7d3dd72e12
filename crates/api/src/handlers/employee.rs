use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use salonbook_core::{
    errors::BookingError,
    models::{
        employee::{CreateEmployeeRequest, Employee, UpdateEmployeeRequest},
        unavailability::{CreateUnavailabilityRequest, Unavailability},
    },
};
use salonbook_db::repositories::{employee, unavailability};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{error_handling::AppError, scope::EstablishmentScope},
};

#[derive(Debug, Default, Deserialize)]
pub struct EmployeeListQuery {
    #[serde(default)]
    pub active: Option<bool>,
}

#[axum::debug_handler]
pub async fn list_employees(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Query(query): Query<EmployeeListQuery>,
) -> Result<Json<Vec<Employee>>, AppError> {
    let rows =
        employee::list_employees(&state.db_pool, scope.id(), query.active.unwrap_or(false)).await?;
    Ok(Json(rows.into_iter().map(Employee::from).collect()))
}

#[axum::debug_handler]
pub async fn create_employee(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Json(payload): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<Employee>), AppError> {
    payload.validate()?;
    let row = employee::create_employee(&state.db_pool, scope.id(), &payload).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

#[axum::debug_handler]
pub async fn get_employee(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
) -> Result<Json<Employee>, AppError> {
    let row = employee::get_employee(&state.db_pool, scope.id(), id)
        .await?
        .ok_or_else(|| BookingError::not_found("Employee", id))?;
    Ok(Json(row.into()))
}

#[axum::debug_handler]
pub async fn update_employee(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEmployeeRequest>,
) -> Result<Json<Employee>, AppError> {
    payload.validate()?;
    let row = employee::update_employee(&state.db_pool, scope.id(), id, &payload)
        .await?
        .ok_or_else(|| BookingError::not_found("Employee", id))?;
    Ok(Json(row.into()))
}

#[axum::debug_handler]
pub async fn delete_employee(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !employee::delete_employee(&state.db_pool, scope.id(), id).await? {
        return Err(BookingError::not_found("Employee", id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

// Unavailabilities

#[axum::debug_handler]
pub async fn list_unavailabilities(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<Vec<Unavailability>>, AppError> {
    employee::get_employee(&state.db_pool, scope.id(), employee_id)
        .await?
        .ok_or_else(|| BookingError::not_found("Employee", employee_id))?;

    let rows = unavailability::list_for_employee(&state.db_pool, employee_id).await?;
    Ok(Json(rows.into_iter().map(Unavailability::from).collect()))
}

#[axum::debug_handler]
pub async fn create_unavailability(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(employee_id): Path<Uuid>,
    Json(payload): Json<CreateUnavailabilityRequest>,
) -> Result<(StatusCode, Json<Unavailability>), AppError> {
    payload.validate()?;
    employee::get_employee(&state.db_pool, scope.id(), employee_id)
        .await?
        .ok_or_else(|| BookingError::not_found("Employee", employee_id))?;

    let row = unavailability::create_unavailability(&state.db_pool, employee_id, &payload).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

#[axum::debug_handler]
pub async fn delete_unavailability(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !unavailability::delete_unavailability(&state.db_pool, scope.id(), id).await? {
        return Err(BookingError::not_found("Unavailability", id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
