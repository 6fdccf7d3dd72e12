use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers::metrics};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/metrics", get(metrics::get_metrics))
}
