use axum::{
    Json,
    extract::{Query, State},
};
use salonbook_core::models::{
    appointment::{AppointmentStatus, PeriodQuery},
    metrics::{Metrics, ServiceMetric, StatusCounts},
};
use salonbook_db::repositories::{customer, metrics};
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{error_handling::AppError, scope::EstablishmentScope},
};

/// Dashboard figures for appointments starting within `[from, to)`.
#[axum::debug_handler]
pub async fn get_metrics(
    State(state): State<Arc<ApiState>>,
    scope: EstablishmentScope,
    Query(period): Query<PeriodQuery>,
) -> Result<Json<Metrics>, AppError> {
    period.validate()?;
    let (from, to) = (period.from, period.to);

    let mut by_status = StatusCounts::default();
    for row in metrics::count_by_status(&state.db_pool, scope.id(), from, to).await? {
        match row.status.parse::<AppointmentStatus>() {
            Ok(status) => by_status.record(status, row.count),
            Err(_) => tracing::warn!("Skipping unknown appointment status '{}'", row.status),
        }
    }

    let revenue_cents = metrics::total_revenue(&state.db_pool, scope.id(), from, to).await?;
    let new_customers = customer::count_new_customers(&state.db_pool, scope.id(), from, to).await?;
    let top_services = metrics::top_services(&state.db_pool, scope.id(), from, to)
        .await?
        .into_iter()
        .map(|row| ServiceMetric {
            service_id: row.service_id,
            name: row.name,
            appointments: row.appointments,
            revenue_cents: row.revenue_cents,
        })
        .collect();

    Ok(Json(Metrics {
        from,
        to,
        total_appointments: by_status.total(),
        by_status,
        revenue_cents,
        new_customers,
        top_services,
    }))
}
