use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers::package};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/packages",
            get(package::list_packages).post(package::create_package),
        )
        .route(
            "/api/packages/:id",
            get(package::get_package)
                .put(package::update_package)
                .delete(package::delete_package),
        )
        .route(
            "/api/packages/:id/purchase",
            post(package::purchase_package),
        )
}
