use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers::establishment};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/establishments", post(establishment::create_establishment))
        .route(
            "/api/establishment",
            get(establishment::get_establishment).put(establishment::update_establishment),
        )
        .route(
            "/api/establishment/onboarding",
            get(establishment::get_onboarding_check),
        )
}
