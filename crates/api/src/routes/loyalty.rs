use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers::loyalty};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/loyalty",
            get(loyalty::list_programs).post(loyalty::create_program),
        )
        .route(
            "/api/loyalty/:id",
            put(loyalty::update_program).delete(loyalty::delete_program),
        )
        .route("/api/loyalty/:id/redeem", post(loyalty::redeem_reward))
}
