use axum::{
    Router,
    routing::{delete, get},
};
use std::sync::Arc;

use crate::{ApiState, handlers::employee};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/employees",
            get(employee::list_employees).post(employee::create_employee),
        )
        .route(
            "/api/employees/:id",
            get(employee::get_employee)
                .put(employee::update_employee)
                .delete(employee::delete_employee),
        )
        .route(
            "/api/employees/:id/unavailabilities",
            get(employee::list_unavailabilities).post(employee::create_unavailability),
        )
        .route(
            "/api/unavailabilities/:id",
            delete(employee::delete_unavailability),
        )
}
