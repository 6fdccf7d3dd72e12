use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers::appointment};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/appointments",
            get(appointment::list_appointments).post(appointment::create_appointment),
        )
        .route(
            "/api/appointments/period",
            get(appointment::list_appointments_by_period),
        )
        .route(
            "/api/appointments/available-slots",
            get(appointment::get_available_slots),
        )
        .route(
            "/api/appointments/:id",
            get(appointment::get_appointment)
                .put(appointment::update_appointment)
                .delete(appointment::delete_appointment),
        )
        .route(
            "/api/appointments/:id/check-in",
            post(appointment::check_in_appointment),
        )
        .route(
            "/api/appointments/:id/complete",
            post(appointment::complete_appointment),
        )
        .route(
            "/api/appointments/:id/cancel",
            post(appointment::cancel_appointment),
        )
}
