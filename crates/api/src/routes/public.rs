use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers::public};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/public/establishments/:id/services",
            get(public::list_public_services),
        )
        .route(
            "/api/public/establishments/:id/available-slots",
            get(public::get_public_available_slots),
        )
        .route(
            "/api/public/establishments/:id/bookings",
            post(public::create_public_booking),
        )
}
