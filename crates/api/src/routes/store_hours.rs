use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers::store_hours};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/store-hours", get(store_hours::list_store_hours))
        .route(
            "/api/store-hours/slots",
            get(store_hours::get_weekly_slots),
        )
        .route(
            "/api/store-hours/:day",
            put(store_hours::upsert_store_hours).delete(store_hours::delete_store_hours),
        )
}
