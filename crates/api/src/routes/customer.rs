use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers::customer};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/customers",
            get(customer::list_customers).post(customer::create_customer),
        )
        .route(
            "/api/customers/:id",
            get(customer::get_customer)
                .put(customer::update_customer)
                .delete(customer::delete_customer),
        )
        .route(
            "/api/customers/:id/packages",
            get(customer::list_customer_packages),
        )
        .route(
            "/api/customers/:id/loyalty",
            get(customer::list_loyalty_balances),
        )
}
