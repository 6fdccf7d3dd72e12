use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers::catalog};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/categories",
            get(catalog::list_categories).post(catalog::create_category),
        )
        .route(
            "/api/categories/:id",
            put(catalog::update_category).delete(catalog::delete_category),
        )
        .route(
            "/api/services",
            get(catalog::list_services).post(catalog::create_service),
        )
        .route(
            "/api/services/:id",
            get(catalog::get_service)
                .put(catalog::update_service)
                .delete(catalog::delete_service),
        )
}
