use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use salonbook_core::{
    errors::BookingError,
    models::{
        category::{Category, CategoryRequest},
        service::{CreateServiceRequest, Service, UpdateServiceRequest},
    },
};
use salonbook_db::repositories::{catalog, ownership::Owned};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{error_handling::AppError, scope::EstablishmentScope},
    services::ownership::ensure_owned,
};

#[derive(Debug, Default, Deserialize)]
pub struct ServiceListQuery {
    #[serde(default)]
    pub active: Option<bool>,
}

// Categories

#[axum::debug_handler]
pub async fn list_categories(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
) -> Result<Json<Vec<Category>>, AppError> {
    let rows = catalog::list_categories(&state.db_pool, scope.id()).await?;
    Ok(Json(rows.into_iter().map(Category::from).collect()))
}

#[axum::debug_handler]
pub async fn create_category(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Json(payload): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    payload.validate()?;
    let row = catalog::create_category(&state.db_pool, scope.id(), payload.name.trim()).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

#[axum::debug_handler]
pub async fn update_category(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryRequest>,
) -> Result<Json<Category>, AppError> {
    payload.validate()?;
    let row = catalog::update_category(&state.db_pool, scope.id(), id, payload.name.trim())
        .await?
        .ok_or_else(|| BookingError::not_found("Category", id))?;
    Ok(Json(row.into()))
}

#[axum::debug_handler]
pub async fn delete_category(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !catalog::delete_category(&state.db_pool, scope.id(), id).await? {
        return Err(BookingError::not_found("Category", id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

// Services

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Query(query): Query<ServiceListQuery>,
) -> Result<Json<Vec<Service>>, AppError> {
    let only_active = query.active.unwrap_or(false);
    let rows = catalog::list_services(&state.db_pool, scope.id(), only_active).await?;
    Ok(Json(rows.into_iter().map(Service::from).collect()))
}

#[axum::debug_handler]
pub async fn create_service(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<(StatusCode, Json<Service>), AppError> {
    payload.validate()?;
    if let Some(category_id) = payload.category_id {
        ensure_owned(&state.db_pool, scope.id(), Owned::Category, category_id).await?;
    }

    let row = catalog::create_service(&state.db_pool, scope.id(), &payload).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

#[axum::debug_handler]
pub async fn get_service(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
) -> Result<Json<Service>, AppError> {
    let row = catalog::get_service(&state.db_pool, scope.id(), id)
        .await?
        .ok_or_else(|| BookingError::not_found("Service", id))?;
    Ok(Json(row.into()))
}

#[axum::debug_handler]
pub async fn update_service(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateServiceRequest>,
) -> Result<Json<Service>, AppError> {
    payload.validate()?;
    if let Some(category_id) = payload.category_id {
        ensure_owned(&state.db_pool, scope.id(), Owned::Category, category_id).await?;
    }

    let row = catalog::update_service(&state.db_pool, scope.id(), id, &payload)
        .await?
        .ok_or_else(|| BookingError::not_found("Service", id))?;
    Ok(Json(row.into()))
}

#[axum::debug_handler]
pub async fn delete_service(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !catalog::delete_service(&state.db_pool, scope.id(), id).await? {
        return Err(BookingError::not_found("Service", id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
